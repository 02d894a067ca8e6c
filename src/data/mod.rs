//! Result table, decimal rounding, and report storage.

pub mod rounding;
pub mod storage;
pub mod table;
