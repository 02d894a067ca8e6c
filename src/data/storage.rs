//! Spreadsheet report writer.
//!
//! Serializes the result table to a single-worksheet xlsx workbook via
//! `rust_xlsxwriter`. Saving overwrites any previous run's file at the same
//! path. A failed save (file locked by another process, permissions) is an
//! explicit error for the caller to surface, never swallowed.

use crate::config::StorageSettings;
use crate::data::table::ResultTable;
use crate::error::AppResult;
use log::info;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

pub struct XlsxReportWriter {
    path: PathBuf,
    sheet_name: String,
}

impl XlsxReportWriter {
    pub fn new(settings: &StorageSettings) -> Self {
        Self {
            path: settings.file_name.clone(),
            sheet_name: settings.sheet_name.clone(),
        }
    }

    /// Place the workbook under `dir` instead of the working directory.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.path = dir.join(
            self.path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| self.path.clone()),
        );
        self
    }

    /// Write header and all rows to the workbook and save it, returning the
    /// path written.
    pub fn save(&self, table: &ResultTable) -> AppResult<PathBuf> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;

        for (col, name) in table.header().iter().enumerate() {
            sheet.write_string(0, col as u16, name)?;
        }
        for (idx, row) in table.rows().iter().enumerate() {
            let r = idx as u32 + 1;
            sheet.write_string(r, 0, &row.timestamp)?;
            for (col, value) in row.values.iter().enumerate() {
                sheet.write_string(r, col as u16 + 1, value)?;
            }
        }

        workbook.save(&self.path)?;
        info!(
            "Report written: {} data rows to '{}'",
            table.rows().len(),
            self.path.display()
        );
        Ok(self.path.clone())
    }
}
