//! VISA bus adapter for GPIB/USB/Ethernet instruments.
//!
//! Wraps the `visa-rs` crate behind the [`ResourceManager`] /
//! [`ScpiConnection`] seam. Supports resource strings like:
//!
//! - `GPIB0::1::INSTR` (GPIB interface)
//! - `USB0::0x2A8D::0x5101::MY58025899::INSTR` (USB)
//! - `TCPIP0::192.168.1.100::INSTR` (Ethernet/LXI)
//!
//! Requires a VISA library installation; the whole module sits behind the
//! `instrument_visa` cargo feature.

use crate::scpi::{ResourceManager, ScpiConnection};
use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use std::ffi::CString;
use std::io::{BufRead, BufReader, Write};
use std::time::Duration;
use visa_rs::enums::attribute::AttrTmoValue;
use visa_rs::prelude::*;

/// Line terminator appended to every command (SCPI convention).
const TERMINATOR: &str = "\n";

pub struct VisaResourceManager {
    rm: DefaultRM,
}

impl VisaResourceManager {
    pub fn new() -> Result<Self> {
        let rm = DefaultRM::new().context("Failed to create VISA resource manager")?;
        Ok(Self { rm })
    }
}

impl ResourceManager for VisaResourceManager {
    type Connection = VisaConnection;

    fn list_resources(&self) -> Result<Vec<String>> {
        let expr: ResID = CString::new("?*INSTR")
            .context("Invalid resource search expression")?
            .into();

        // Some VISA implementations report "no resources" as an error from
        // the find call. Treat that as an empty bus rather than a failure.
        let mut list = match self.rm.find_res_list(&expr) {
            Ok(list) => list,
            Err(e) => {
                warn!("VISA resource enumeration returned nothing: {e}");
                return Ok(Vec::new());
            }
        };

        let mut addresses = Vec::new();
        while let Some(res) = list
            .find_next()
            .context("Failed to walk VISA resource list")?
        {
            addresses.push(res.to_string());
        }
        Ok(addresses)
    }

    fn open(&self, address: &str, timeout: Duration) -> Result<VisaConnection> {
        let name: ResID = CString::new(address)
            .with_context(|| format!("Invalid VISA address: {address}"))?
            .into();

        let instr = self
            .rm
            .open(&name, AccessMode::NO_LOCK, TIMEOUT_IMMEDIATE)
            .with_context(|| format!("Failed to open VISA resource: {address}"))?;

        let tmo = AttrTmoValue::new_checked(timeout.as_millis() as u32)
            .ok_or_else(|| anyhow!("Invalid VISA timeout: {timeout:?}"))?;
        instr
            .set_attr(tmo.into())
            .with_context(|| format!("Failed to set {timeout:?} timeout on {address}"))?;

        debug!(
            "VISA resource '{}' opened with {}ms timeout",
            address,
            timeout.as_millis()
        );
        Ok(VisaConnection {
            address: address.to_string(),
            instr,
        })
    }
}

/// One open VISA session. Dropping it closes the session.
pub struct VisaConnection {
    address: String,
    instr: Instrument,
}

impl ScpiConnection for VisaConnection {
    fn write(&mut self, command: &str) -> Result<()> {
        let line = format!("{command}{TERMINATOR}");
        (&self.instr)
            .write_all(line.as_bytes())
            .with_context(|| format!("VISA write failed for '{command}' on {}", self.address))?;
        debug!("VISA command sent: {command}");
        Ok(())
    }

    fn query(&mut self, command: &str) -> Result<String> {
        self.write(command)?;

        let mut reader = BufReader::new(&self.instr);
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .with_context(|| format!("VISA read failed for '{command}' on {}", self.address))?;

        let response = line.trim().to_string();
        debug!("VISA query '{command}' -> '{response}'");
        Ok(response)
    }
}
