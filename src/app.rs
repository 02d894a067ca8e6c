//! One-shot run orchestration.
//!
//! Drives the whole sequence strictly in order, no state re-entered:
//!
//! ```text
//! DISCOVER -> CONFIGURE -> SCANNING -> SAVE -> CLOSE
//! ```
//!
//! Every component takes its inputs from [`Settings`] by reference; there is
//! no shared mutable state. The persistent connection is an owned value in
//! this function's scope, so it closes on every exit path — a mid-scan error
//! cannot leak it.

use crate::config::Settings;
use crate::data::storage::XlsxReportWriter;
use crate::data::table::ResultTable;
use crate::discovery;
use crate::error::TemplogError;
use crate::instrument::daq970a;
use crate::scpi::ResourceManager;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    /// Scan cycles completed (equals the configured cycle count).
    pub cycles: u32,
    /// Path the workbook was saved to.
    pub output: PathBuf,
}

/// Execute one full logging run against the given resource manager.
///
/// Fails with [`TemplogError::DeviceNotFound`] before any instrument I/O if
/// no resource matches the configured identity fragment; in that case no
/// persistent connection is opened and no output file is created.
pub fn run<M: ResourceManager>(rm: &M, settings: &Settings) -> Result<RunSummary> {
    let address = discovery::find_instrument(
        rm,
        &settings.instrument.idn_match,
        settings.instrument.timeout,
    )?
    .ok_or_else(|| TemplogError::DeviceNotFound(settings.instrument.idn_match.clone()))?;
    println!("Selected DAQ970A at {address}");

    let mut daq = rm
        .open(&address, settings.instrument.timeout)
        .with_context(|| format!("Failed to open persistent connection to {address}"))?;

    daq970a::configure(&mut daq, &settings.scan)?;

    let mut table = ResultTable::new(&settings.scan.channels);
    daq970a::run_scan(&mut daq, &settings.scan, &mut table)?;

    let output = XlsxReportWriter::new(&settings.storage).save(&table)?;
    println!("Data saved to {}", output.display());

    Ok(RunSummary {
        cycles: settings.scan.cycles,
        output,
    })
}
