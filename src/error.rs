//! Custom error types for the application.
//!
//! This module defines the primary error type, `TemplogError`, for the entire
//! application. Using the `thiserror` crate, it provides a centralized and
//! consistent way to handle the different kinds of errors that can occur
//! during a logging run, from configuration issues to instrument-bus and
//! report-file problems.
//!
//! ## Error Hierarchy
//!
//! - **`Config`**: Wraps errors from the `config` crate, typically related to
//!   file parsing or format issues in the configuration files.
//! - **`Io`**: Wraps standard `std::io::Error`, covering file I/O issues.
//! - **`Bus`**: Instrument-bus communication failures (open, write, query,
//!   timeout). These are fatal once the persistent connection is up, since a
//!   scan on a misconfigured instrument is meaningless.
//! - **`DeviceNotFound`**: No enumerated resource matched the expected
//!   identity fragment. Surfaced to the user as a clean message rather than
//!   an abrupt termination.
//! - **`Parse`**: A fetched reading could not be interpreted as a decimal
//!   number.
//! - **`Report`**: Wraps spreadsheet-writer errors, including save failures
//!   when the output file is locked by another process. These are surfaced,
//!   never swallowed.
//! - **`FeatureNotEnabled`**: The code attempted to use functionality that
//!   was not included at compile time via feature flags, with a clear message
//!   on how to enable it.
//!
//! By using `#[from]`, `TemplogError` can be seamlessly created from
//! underlying error types, simplifying error handling throughout the
//! application with the `?` operator.

use thiserror::Error;

/// Convenience alias for results using the application error type.
pub type AppResult<T> = std::result::Result<T, TemplogError>;

#[derive(Error, Debug)]
pub enum TemplogError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Instrument bus error: {0}")]
    Bus(String),

    #[error("No instrument matching '{0}' found on the bus")]
    DeviceNotFound(String),

    #[error("Unparseable reading '{0}'")]
    Parse(String),

    #[error("Report error: {0}")]
    Report(#[from] rust_xlsxwriter::XlsxError),

    #[error("Feature '{0}' is not enabled. Please build with --features {0}")]
    FeatureNotEnabled(String),
}
