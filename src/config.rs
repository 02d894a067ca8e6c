//! Configuration management.
//!
//! Settings are loaded from `config/<name>.toml` (default: `config/default`)
//! using the `config` crate and deserialized into typed structs. Durations
//! are written in human form (`"10s"`, `"2s"`) and parsed via
//! `humantime-serde`.
//!
//! Every tunable of a logging run lives here so the components themselves
//! hold no global state: the expected identity fragment used for device
//! selection, the channel scan list, cycle count, settle time, scan interval,
//! response timeout, and the output file/sheet names.

use crate::error::TemplogError;
use config::Config;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub log_level: String,
    pub instrument: InstrumentSettings,
    pub scan: ScanSettings,
    pub storage: StorageSettings,
}

/// Device selection and bus parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct InstrumentSettings {
    /// Substring the `*IDN?` response must contain (e.g. a serial fragment).
    pub idn_match: String,
    /// Response timeout on the persistent connection.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

/// Scan-list definition and cycle timing.
#[derive(Debug, Deserialize, Clone)]
pub struct ScanSettings {
    /// Channel identifiers in scan order (e.g. "112", "101").
    pub channels: Vec<String>,
    /// Number of scan cycles to run.
    pub cycles: u32,
    /// Fixed acquisition settle time after INIT. Deliberately a worst-case
    /// wait; there is no completion polling.
    #[serde(with = "humantime_serde")]
    pub settle: Duration,
    /// Pause between scan cycles.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
}

/// Report output location.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Workbook file name, overwritten on each run.
    pub file_name: PathBuf,
    /// Worksheet name inside the workbook.
    pub sheet_name: String,
}

impl Settings {
    pub fn new(config_name: Option<&str>) -> Result<Self, TemplogError> {
        let config_path = format!("config/{}", config_name.unwrap_or("default"));
        let s = Config::builder()
            .add_source(config::File::with_name(&config_path))
            .build()
            .map_err(TemplogError::Config)?;

        s.try_deserialize().map_err(TemplogError::Config)
    }
}

impl Default for Settings {
    /// The channel map and identity fragment of the product-B thermal rig.
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            instrument: InstrumentSettings {
                idn_match: "MY58025899".to_string(),
                timeout: Duration::from_secs(10),
            },
            scan: ScanSettings {
                channels: ["112", "101", "102", "103", "104", "105", "116", "117", "118"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                cycles: 5,
                settle: Duration::from_secs(10),
                interval: Duration::from_secs(2),
            },
            storage: StorageSettings {
                file_name: PathBuf::from("DAQ970A_Temperature_Log.xlsx"),
                sheet_name: "DAQ Log".to_string(),
            },
        }
    }
}
