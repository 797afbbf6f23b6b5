//! CSV output.

use std::path::Path;

use csv::WriterBuilder;

use sheetmap_model::Table;

use crate::error::{OutputError, Result};

/// Write the table as CSV with a header row. Nulls become empty fields.
pub fn write_output_csv(table: &Table, path: &Path) -> Result<()> {
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_error)?;
    writer
        .write_record(table.columns().iter().map(|c| c.name.as_str()))
        .map_err(csv_error)?;
    for index in 0..table.row_count() {
        let row = table.row(index).unwrap_or_default();
        writer
            .write_record(row.iter().map(|value| value.to_string()))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
