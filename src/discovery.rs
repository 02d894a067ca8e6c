//! Resource scanner.
//!
//! Walks every resource the host can see, probes each with `*IDN?`, and
//! selects the first whose identity string contains the expected fragment
//! (typically a serial-number substring — the only supported multi-device
//! disambiguation). A bad resource never aborts the scan: per-address
//! failures are logged and enumeration continues.

use crate::scpi::{ResourceManager, ScpiConnection};
use anyhow::Result;
use log::{info, warn};
use std::time::Duration;

/// Find the first resource whose `*IDN?` response contains `idn_match`.
///
/// Returns `Ok(None)` when no resource matches; later candidates are never
/// probed once a match is found. Each probe connection is dropped (closed)
/// before the next address is tried.
pub fn find_instrument<M: ResourceManager>(
    rm: &M,
    idn_match: &str,
    probe_timeout: Duration,
) -> Result<Option<String>> {
    println!("Scanning VISA resources...");
    for address in rm.list_resources()? {
        match probe(rm, &address, probe_timeout) {
            Ok(idn) => {
                println!("Found: {idn} at {address}");
                if idn.contains(idn_match) {
                    info!("Identity match '{idn_match}' at {address}");
                    return Ok(Some(address));
                }
            }
            Err(e) => warn!("Failed to query {address}: {e:#}"),
        }
    }
    Ok(None)
}

fn probe<M: ResourceManager>(rm: &M, address: &str, timeout: Duration) -> Result<String> {
    let mut conn = rm.open(address, timeout)?;
    conn.query("*IDN?")
}
