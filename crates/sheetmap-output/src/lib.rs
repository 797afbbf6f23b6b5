//! Output serialization for sheetmap.
//!
//! The transformed table is written as a single sheet named
//! [`OUTPUT_SHEET_NAME`] with a header row and no index column. CSV output is
//! available for `.csv` paths.

mod delimited;
mod error;
mod xlsx;

use std::path::Path;

use tracing::info;

use sheetmap_model::Table;

pub use delimited::write_output_csv;
pub use error::{OutputError, Result};
pub use xlsx::{OUTPUT_SHEET_NAME, output_xlsx_bytes, write_output_xlsx};

/// Write the output table, choosing the format from the path extension.
pub fn write_output(table: &Table, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "xlsx" => write_output_xlsx(table, path)?,
        "csv" => write_output_csv(table, path)?,
        _ => {
            return Err(OutputError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            });
        }
    }
    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "wrote output"
    );
    Ok(())
}
