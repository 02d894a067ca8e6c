//! Keysight DAQ970A driver: channel configuration and the acquisition loop.
//!
//! Configuration programs every scan channel for K-type thermocouple
//! sensing with internal reference-junction compensation, then defines the
//! scan list. All configuration commands are fire-and-forget; a failure here
//! is fatal to the run since a scan on a misconfigured instrument would be
//! meaningless.
//!
//! The scan loop triggers `INIT`, waits out a fixed settle time sized for
//! worst-case acquisition of the configured channel count (no completion
//! polling), fetches and rounds the readings, and appends one timestamped
//! row per cycle.

use crate::config::ScanSettings;
use crate::data::table::ResultTable;
use crate::scpi::ScpiConnection;
use anyhow::Result;
use log::debug;
use std::thread;

/// Thermocouple type programmed on every scan channel.
const TC_TYPE: &str = "K";

/// Reset the instrument and program the scan list.
///
/// Issues, in order: `ABOR`, `*RST;*CLS`, per-channel `CONF`/`SENS` pairs,
/// then a single `ROUT:SCAN` naming every channel.
pub fn configure<C: ScpiConnection>(daq: &mut C, scan: &ScanSettings) -> Result<()> {
    // Abort any previous scan safely before resetting.
    daq.write("ABOR")?;
    daq.write("*RST;*CLS")?;

    for ch in &scan.channels {
        daq.write(&format!("CONF:TEMP TC,{TC_TYPE},(@{ch})"))?;
        // Internal reference junction.
        daq.write(&format!("SENS:TEMP:TRAN:TC:RJUN:TYPE INT,(@{ch})"))?;
    }

    daq.write(&format!("ROUT:SCAN (@{})", scan.channels.join(",")))?;
    debug!("Scan list programmed for {} channels", scan.channels.len());
    Ok(())
}

/// Run exactly `scan.cycles` trigger/fetch cycles, appending one row per
/// cycle to `table` and printing a progress line.
///
/// The trailing interval sleep also runs after the final cycle, matching the
/// rig's established timing.
pub fn run_scan<C: ScpiConnection>(
    daq: &mut C,
    scan: &ScanSettings,
    table: &mut ResultTable,
) -> Result<()> {
    for cycle in 0..scan.cycles {
        daq.write("INIT")?;
        thread::sleep(scan.settle);

        let readings = daq.query("FETC?")?;
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let row = table.append_reading(timestamp, &readings)?;
        println!(
            "Scan {}: {} | {}",
            cycle + 1,
            row.timestamp,
            row.values.join(", ")
        );

        thread::sleep(scan.interval);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock_adapter::MockConnection;
    use crate::adapters::{MockResource, MockResourceManager};
    use crate::scpi::ResourceManager;
    use std::time::Duration;

    fn fast_scan(channels: &[&str], cycles: u32) -> ScanSettings {
        ScanSettings {
            channels: channels.iter().map(|s| s.to_string()).collect(),
            cycles,
            settle: Duration::ZERO,
            interval: Duration::ZERO,
        }
    }

    fn open_mock(fetch: &[&str]) -> (MockResourceManager, MockConnection) {
        let rm = MockResourceManager::new(vec![MockResource::instrument(
            "USB0::DAQ::INSTR",
            "Keysight Technologies,DAQ970A,MY58025899,A.02",
            fetch,
        )]);
        let conn = rm.open("USB0::DAQ::INSTR", Duration::from_secs(1)).unwrap();
        (rm, conn)
    }

    #[test]
    fn test_configure_command_sequence() {
        let (rm, mut conn) = open_mock(&[]);
        configure(&mut conn, &fast_scan(&["112", "101"], 1)).unwrap();

        assert_eq!(
            rm.commands_for("USB0::DAQ::INSTR"),
            vec![
                "ABOR",
                "*RST;*CLS",
                "CONF:TEMP TC,K,(@112)",
                "SENS:TEMP:TRAN:TC:RJUN:TYPE INT,(@112)",
                "CONF:TEMP TC,K,(@101)",
                "SENS:TEMP:TRAN:TC:RJUN:TYPE INT,(@101)",
                "ROUT:SCAN (@112,101)",
            ]
        );
    }

    #[test]
    fn test_scan_appends_one_row_per_cycle() {
        let (_rm, mut conn) = open_mock(&["23.001,24.502", "23.455,24.999"]);
        let scan = fast_scan(&["112", "101"], 2);
        let mut table = ResultTable::new(&scan.channels);

        run_scan(&mut conn, &scan, &mut table).unwrap();

        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0].values, vec!["23.00", "24.50"]);
        assert_eq!(table.rows()[1].values, vec!["23.46", "25.00"]);
    }

    #[test]
    fn test_each_cycle_triggers_before_fetching() {
        let (rm, mut conn) = open_mock(&["21.5"]);
        let scan = fast_scan(&["112"], 3);
        let mut table = ResultTable::new(&scan.channels);

        run_scan(&mut conn, &scan, &mut table).unwrap();

        let commands = rm.commands_for("USB0::DAQ::INSTR");
        assert_eq!(
            commands,
            vec!["INIT", "FETC?", "INIT", "FETC?", "INIT", "FETC?"]
        );
    }

    #[test]
    fn test_unparseable_fetch_fails_the_run() {
        let (_rm, mut conn) = open_mock(&["+OVLD,+OVLD"]);
        let scan = fast_scan(&["112", "101"], 2);
        let mut table = ResultTable::new(&scan.channels);

        assert!(run_scan(&mut conn, &scan, &mut table).is_err());
        assert!(table.rows().is_empty());
    }
}
