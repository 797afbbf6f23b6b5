//! Workbook ingestion for sheetmap.
//!
//! Reads source and target files into [`Workbook`]s of named sheets. The first
//! row of every sheet is the header; header cells are coerced to strings.
//!
//! - **Spreadsheets**: xlsx, xlsm, xlsb, xls and ods through calamine
//! - **CSV**: a single sheet named after the file stem
//!
//! An unreadable file is fatal: callers must not attempt a transform.

mod delimited;
mod error;
mod header;
mod spreadsheet;

use std::path::Path;

use tracing::info;

use sheetmap_model::Workbook;

pub use delimited::{parse_csv, parse_field, read_csv_workbook};
pub use error::{IngestError, Result};
pub use header::normalize_headers;
pub use spreadsheet::{range_to_table, read_spreadsheet};

/// File extensions understood by [`read_workbook`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

/// Read a workbook, dispatching on the file extension.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let workbook = match extension.as_str() {
        "csv" => read_csv_workbook(path)?,
        ext if SUPPORTED_EXTENSIONS.contains(&ext) => read_spreadsheet(path)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            });
        }
    };
    info!(
        path = %path.display(),
        sheets = workbook.sheets.len(),
        "read workbook"
    );
    Ok(workbook)
}
