//! Single-sheet xlsx output.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use sheetmap_model::{CellValue, Table};

use crate::error::{OutputError, Result};

/// Name of the only sheet in the output workbook.
pub const OUTPUT_SHEET_NAME: &str = "Output";

/// Rows per worksheet, header row included.
const MAX_ROWS: usize = 1_048_576;
/// Columns per worksheet.
const MAX_COLUMNS: usize = 16_384;

/// Serialize a table to xlsx bytes: header row of column names, no index column.
pub fn output_xlsx_bytes(table: &Table) -> Result<Vec<u8>> {
    let too_large = || OutputError::TooLarge {
        rows: table.row_count(),
        columns: table.column_count(),
    };
    if table.column_count() > MAX_COLUMNS || table.row_count() >= MAX_ROWS {
        return Err(too_large());
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(OUTPUT_SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, column) in table.columns().iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| too_large())?;
        worksheet.write_string_with_format(0, col, &column.name, &header)?;
        for (row, value) in column.values.iter().enumerate() {
            let row = u32::try_from(row + 1).map_err(|_| too_large())?;
            write_cell(worksheet, row, col, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write the table to an xlsx file.
pub fn write_output_xlsx(table: &Table, path: &Path) -> Result<()> {
    let bytes = output_xlsx_bytes(table)?;
    fs::write(path, bytes).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<()> {
    match value {
        CellValue::Null => {}
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) if f.is_finite() => {
            worksheet.write_number(row, col, *f)?;
        }
        CellValue::Float(f) => {
            worksheet.write_string(row, col, f.to_string())?;
        }
        CellValue::Text(s) | CellValue::DateTime(s) => {
            worksheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}
