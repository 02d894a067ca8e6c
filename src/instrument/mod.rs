//! Instrument drivers.

pub mod daq970a;
