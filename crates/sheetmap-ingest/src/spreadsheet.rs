//! Spreadsheet (xlsx, xlsm, xlsb, xls, ods) loading through calamine.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use sheetmap_model::{CellValue, Column, Sheet, Table, Workbook};

use crate::error::{IngestError, Result};
use crate::header::{normalize_headers, number_header};

/// Text form of spreadsheet dates and times.
const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

/// Read every sheet of a spreadsheet file, in workbook order.
pub fn read_spreadsheet(path: &Path) -> Result<Workbook> {
    let mut workbook = open_workbook_auto(path).map_err(|source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|source| IngestError::Sheet {
                path: path.to_path_buf(),
                sheet: sheet_name.clone(),
                source,
            })?;
        let table = range_to_table(&range);
        debug!(
            sheet = %sheet_name,
            rows = table.row_count(),
            columns = table.column_count(),
            "read sheet"
        );
        sheets.push(Sheet {
            name: sheet_name,
            table,
        });
    }
    Ok(Workbook::new(sheets))
}

/// Convert a sheet range to a table, using the first row as header.
pub fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };
    let names = normalize_headers(header.iter().map(header_text).collect());

    let mut values: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
    let mut row_count = 0;
    for row in rows {
        row_count += 1;
        for (index, column) in values.iter_mut().enumerate() {
            column.push(row.get(index).map_or(CellValue::Null, cell_value));
        }
    }

    let mut table = Table::with_row_count(row_count);
    for (name, column) in names.into_iter().zip(values) {
        table.push_column_fitted(Column::new(name, column));
    }
    table
}

fn header_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(number_header(*f)),
        Data::Int(i) => Some(i.to_string()),
        other => Some(cell_value(other).to_string()),
    }
}

/// Map a calamine cell onto the opaque model value.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(CellValue::Float(dt.as_f64()), |d| {
                CellValue::DateTime(d.format(ISO_DATETIME).to_string())
            }),
        Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    fn date_cell(serial: f64, is_1904: bool) -> Data {
        Data::DateTime(ExcelDateTime::new(
            serial,
            ExcelDateTimeType::DateTime,
            is_1904,
        ))
    }

    #[test]
    fn test_excel_dates_become_iso_text() {
        assert_eq!(
            cell_value(&date_cell(45306.0, false)),
            CellValue::DateTime("2024-01-15T00:00:00".into())
        );
        assert_eq!(
            cell_value(&date_cell(45306.5, false)),
            CellValue::DateTime("2024-01-15T12:00:00".into())
        );
    }

    #[test]
    fn test_1904_date_system() {
        assert_eq!(
            cell_value(&date_cell(0.0, true)),
            CellValue::DateTime("1904-01-01T00:00:00".into())
        );
        assert_eq!(
            cell_value(&date_cell(43844.0, true)),
            CellValue::DateTime("2024-01-15T00:00:00".into())
        );
    }

    #[test]
    fn test_dates_before_1900_leap_day() {
        assert_eq!(
            cell_value(&date_cell(1.0, false)),
            CellValue::DateTime("1900-01-01T00:00:00".into())
        );
        assert_eq!(
            cell_value(&date_cell(61.0, false)),
            CellValue::DateTime("1900-03-01T00:00:00".into())
        );
    }

    #[test]
    fn test_range_to_table() {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("Ad".into()));
        range.set_value((0, 1), Data::Float(2024.0));
        range.set_value((1, 0), Data::String("Ali".into()));
        range.set_value((1, 1), Data::Float(3.0));
        range.set_value((2, 0), Data::String("Ayşe".into()));

        let table = range_to_table(&range);
        assert_eq!(table.column_names(), vec!["Ad", "2024", "Unnamed: 2"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("2024").unwrap().values,
            vec![CellValue::Float(3.0), CellValue::Null]
        );
    }

    #[test]
    fn test_empty_range_is_empty_table() {
        let range: Range<Data> = Range::empty();
        let table = range_to_table(&range);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }
}
