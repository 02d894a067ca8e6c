//! End-to-end run against a simulated instrument.

use daq_templog::adapters::{MockResource, MockResourceManager};
use daq_templog::app;
use daq_templog::config::Settings;
use daq_templog::error::TemplogError;
use std::path::Path;
use std::time::Duration;

const DAQ_ADDRESS: &str = "USB0::0x2A8D::0x5101::MY58025899::INSTR";
const DAQ_IDN: &str = "Keysight Technologies,DAQ970A,MY58025899,A.02.01-02.40";
const FETCH: &str = "23.001,24.502,25.100,26.005,22.900,21.555,20.004,19.995,18.5";

/// Default settings with timing zeroed out and output under `dir`.
fn fast_settings(dir: &Path, cycles: u32) -> Settings {
    let mut settings = Settings::default();
    settings.scan.cycles = cycles;
    settings.scan.settle = Duration::ZERO;
    settings.scan.interval = Duration::ZERO;
    settings.storage.file_name = dir.join("DAQ970A_Temperature_Log.xlsx");
    settings
}

/// A bus with a dead resource and a non-matching instrument in front of the
/// DAQ970A, like a real host with stale serial ports.
fn busy_bus() -> MockResourceManager {
    MockResourceManager::new(vec![
        MockResource::unreachable("ASRL1::INSTR"),
        MockResource::instrument("USB0::POWER::INSTR", "SomeVendor,PSU123,XX999,1.0", &[]),
        MockResource::instrument(DAQ_ADDRESS, DAQ_IDN, &[FETCH]),
    ])
}

#[test]
fn test_full_run_produces_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let rm = busy_bus();
    let settings = fast_settings(dir.path(), 2);

    let summary = app::run(&rm, &settings).unwrap();

    assert_eq!(summary.cycles, 2);
    assert!(summary.output.exists());

    // Probe, then configuration, then two trigger/fetch cycles.
    let commands = rm.commands_for(DAQ_ADDRESS);
    assert_eq!(commands[0], "*IDN?");
    assert_eq!(commands[1], "ABOR");
    assert_eq!(commands[2], "*RST;*CLS");
    assert_eq!(
        commands.iter().filter(|c| c.as_str() == "INIT").count(),
        2
    );
    assert_eq!(
        commands.iter().filter(|c| c.as_str() == "FETC?").count(),
        2
    );
    // 9 channels, two commands each.
    assert_eq!(
        commands
            .iter()
            .filter(|c| c.starts_with("CONF:TEMP TC,K,"))
            .count(),
        9
    );
    assert!(commands.contains(
        &"ROUT:SCAN (@112,101,102,103,104,105,116,117,118)".to_string()
    ));
}

#[test]
fn test_second_run_overwrites_output() {
    let dir = tempfile::tempdir().unwrap();
    let settings = fast_settings(dir.path(), 1);

    let first = app::run(&busy_bus(), &settings).unwrap();
    let second = app::run(&busy_bus(), &settings).unwrap();

    assert_eq!(first.output, second.output);
    assert!(second.output.exists());
    // Still exactly one file in the output directory.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_device_not_found_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let rm = MockResourceManager::new(vec![MockResource::instrument(
        "USB0::POWER::INSTR",
        "SomeVendor,PSU123,XX999,1.0",
        &[],
    )]);
    let settings = fast_settings(dir.path(), 2);

    let err = app::run(&rm, &settings).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TemplogError>(),
        Some(TemplogError::DeviceNotFound(_))
    ));

    // No output file, and no instrument I/O beyond the identity probe.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert_eq!(rm.commands_for("USB0::POWER::INSTR"), vec!["*IDN?"]);
}

#[test]
fn test_mismatched_fetch_still_completes_with_normalized_rows() {
    let dir = tempfile::tempdir().unwrap();
    // Instrument returns 3 values for 9 configured channels.
    let rm = MockResourceManager::new(vec![MockResource::instrument(
        DAQ_ADDRESS,
        DAQ_IDN,
        &["23.001,24.502,25.1"],
    )]);
    let settings = fast_settings(dir.path(), 1);

    let summary = app::run(&rm, &settings).unwrap();
    assert!(summary.output.exists());
}
