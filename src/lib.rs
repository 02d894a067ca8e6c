//! Automated K-type thermocouple temperature logging for the Keysight
//! DAQ970A.
//!
//! One run discovers the instrument on the VISA bus by an identity-string
//! fragment, programs the thermocouple scan list, executes a bounded number
//! of scan cycles at a fixed interval, and writes the rounded, timestamped
//! readings to a spreadsheet workbook.
//!
//! The instrument bus sits behind the traits in [`scpi`], with a real VISA
//! adapter (behind the `instrument_visa` feature) and a scripted mock in
//! [`adapters`].

pub mod adapters;
pub mod app;
pub mod config;
pub mod data;
pub mod discovery;
pub mod error;
pub mod instrument;
pub mod scpi;
