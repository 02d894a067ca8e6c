//! The in-memory result table.
//!
//! One header row naming the timestamp and channel columns, then one
//! append-only [`ReadingRow`] per completed scan cycle, in acquisition order.
//! The table is grown by the scan loop and serialized once by the report
//! writer; it is never mutated after a row lands.

use crate::data::rounding::round_half_up_2dp;
use crate::error::AppResult;
use log::warn;

/// One scan cycle's output: a wall-clock timestamp plus one rounded value
/// per configured channel, in scan-list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingRow {
    pub timestamp: String,
    pub values: Vec<String>,
}

/// Ordered collection of reading rows for one run.
#[derive(Debug, Clone)]
pub struct ResultTable {
    channels: Vec<String>,
    rows: Vec<ReadingRow>,
}

impl ResultTable {
    pub fn new(channels: &[String]) -> Self {
        Self {
            channels: channels.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Column names: `Timestamp`, then `Ch<id>` per channel.
    pub fn header(&self) -> Vec<String> {
        std::iter::once("Timestamp".to_string())
            .chain(self.channels.iter().map(|ch| format!("Ch{ch}")))
            .collect()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn rows(&self) -> &[ReadingRow] {
        &self.rows
    }

    /// Parse one comma-separated `FETC?` response, round each value to two
    /// decimals, and append the row.
    ///
    /// If the instrument returns a different number of values than there are
    /// configured channels, the row is normalized to the channel count:
    /// missing values become empty cells, extras are dropped, and a warning
    /// names both counts. An unparseable value fails the cycle instead.
    pub fn append_reading(&mut self, timestamp: String, raw_csv: &str) -> AppResult<&ReadingRow> {
        let mut values = raw_csv
            .trim()
            .split(',')
            .map(round_half_up_2dp)
            .collect::<AppResult<Vec<_>>>()?;

        if values.len() != self.channels.len() {
            warn!(
                "Fetched {} values for {} configured channels; row normalized to the channel count",
                values.len(),
                self.channels.len()
            );
            values.resize(self.channels.len(), String::new());
        }

        self.rows.push(ReadingRow { timestamp, values });
        Ok(&self.rows[self.rows.len() - 1])
    }
}
