//! The instrument-control seam.
//!
//! Two small traits abstract the bus so the discovery, configuration and
//! scan logic can run against real VISA hardware or an in-process mock:
//!
//! - [`ResourceManager`]: enumerates visible resource addresses and opens
//!   connections to them.
//! - [`ScpiConnection`]: a single open connection speaking line-oriented
//!   SCPI. `write` is fire-and-forget; `query` expects one response line.
//!
//! Connections are owned values; dropping one closes it. That holds on every
//! exit path, including mid-scan errors.

use anyhow::Result;
use std::time::Duration;

/// One open connection to an instrument.
pub trait ScpiConnection {
    /// Send a command with no response expected.
    fn write(&mut self, command: &str) -> Result<()>;

    /// Send a query and return the (trimmed) response.
    fn query(&mut self, command: &str) -> Result<String>;
}

/// Enumerates and opens instrument resources.
pub trait ResourceManager {
    type Connection: ScpiConnection;

    /// All resource addresses currently visible to the host.
    fn list_resources(&self) -> Result<Vec<String>>;

    /// Open a connection to `address` with the given response timeout.
    fn open(&self, address: &str, timeout: Duration) -> Result<Self::Connection>;
}
