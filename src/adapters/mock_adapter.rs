//! A scripted in-process bus for tests.
//!
//! `MockResourceManager` plays the role of the VISA layer: it enumerates a
//! fixed set of resources, each with an identity string and staged `FETC?`
//! responses, and records every command sent to every address so tests can
//! assert on the exact SCPI traffic.

use crate::scpi::{ResourceManager, ScpiConnection};
use anyhow::{anyhow, bail, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// One simulated resource on the bus.
#[derive(Debug, Clone)]
pub struct MockResource {
    pub address: String,
    /// `*IDN?` response; `None` simulates a probe timeout.
    pub idn: Option<String>,
    /// Staged `FETC?` responses; the last one repeats once exhausted.
    pub fetch: Vec<String>,
    /// Simulate a connection failure on open.
    pub fail_open: bool,
}

impl MockResource {
    /// A healthy instrument with staged scan data.
    pub fn instrument(address: &str, idn: &str, fetch: &[&str]) -> Self {
        Self {
            address: address.to_string(),
            idn: Some(idn.to_string()),
            fetch: fetch.iter().map(|s| s.to_string()).collect(),
            fail_open: false,
        }
    }

    /// A resource that opens but never answers `*IDN?`.
    pub fn silent(address: &str) -> Self {
        Self {
            address: address.to_string(),
            idn: None,
            fetch: Vec::new(),
            fail_open: false,
        }
    }

    /// A resource that cannot be opened at all.
    pub fn unreachable(address: &str) -> Self {
        Self {
            address: address.to_string(),
            idn: None,
            fetch: Vec::new(),
            fail_open: true,
        }
    }
}

#[derive(Default)]
struct BusLog {
    /// Every write and query, as (address, command), in issue order.
    commands: Vec<(String, String)>,
    /// Next staged fetch response per address.
    fetch_cursor: HashMap<String, usize>,
}

pub struct MockResourceManager {
    resources: Vec<MockResource>,
    log: Arc<Mutex<BusLog>>,
}

impl MockResourceManager {
    pub fn new(resources: Vec<MockResource>) -> Self {
        Self {
            resources,
            log: Arc::new(Mutex::new(BusLog::default())),
        }
    }

    fn log_guard(&self) -> MutexGuard<'_, BusLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// All commands (writes and queries) issued to `address`, in order.
    pub fn commands_for(&self, address: &str) -> Vec<String> {
        self.log_guard()
            .commands
            .iter()
            .filter(|(a, _)| a == address)
            .map(|(_, c)| c.clone())
            .collect()
    }

    /// Whether any traffic at all reached `address`.
    pub fn was_probed(&self, address: &str) -> bool {
        !self.commands_for(address).is_empty()
    }
}

impl ResourceManager for MockResourceManager {
    type Connection = MockConnection;

    fn list_resources(&self) -> Result<Vec<String>> {
        Ok(self.resources.iter().map(|r| r.address.clone()).collect())
    }

    fn open(&self, address: &str, _timeout: Duration) -> Result<MockConnection> {
        let resource = self
            .resources
            .iter()
            .find(|r| r.address == address)
            .ok_or_else(|| anyhow!("no such resource: {address}"))?;
        if resource.fail_open {
            bail!("failed to open {address}: connection refused");
        }
        Ok(MockConnection {
            resource: resource.clone(),
            log: Arc::clone(&self.log),
        })
    }
}

pub struct MockConnection {
    resource: MockResource,
    log: Arc<Mutex<BusLog>>,
}

impl MockConnection {
    fn record(&self, command: &str) {
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .commands
            .push((self.resource.address.clone(), command.to_string()));
    }
}

impl ScpiConnection for MockConnection {
    fn write(&mut self, command: &str) -> Result<()> {
        self.record(command);
        Ok(())
    }

    fn query(&mut self, command: &str) -> Result<String> {
        self.record(command);
        match command {
            "*IDN?" => self
                .resource
                .idn
                .clone()
                .ok_or_else(|| anyhow!("query timed out on {}", self.resource.address)),
            "FETC?" => {
                if self.resource.fetch.is_empty() {
                    bail!("no scan data staged for {}", self.resource.address);
                }
                let mut log = self.log.lock().unwrap_or_else(|e| e.into_inner());
                let cursor = log
                    .fetch_cursor
                    .entry(self.resource.address.clone())
                    .or_insert(0);
                let idx = (*cursor).min(self.resource.fetch.len() - 1);
                *cursor += 1;
                Ok(self.resource.fetch[idx].clone())
            }
            other => bail!("unsupported query: {other}"),
        }
    }
}
