//! CSV loading as a single-sheet workbook.

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;

use sheetmap_model::{CellValue, Column, Sheet, Table, Workbook};

use crate::error::{IngestError, Result};
use crate::header::normalize_headers;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Read a CSV file as a workbook with one sheet named after the file stem.
pub fn read_csv_workbook(path: &Path) -> Result<Workbook> {
    let bytes = fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_csv(bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..])).map_err(|source| {
        IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string();
    Ok(Workbook::new(vec![Sheet { name, table }]))
}

/// Parse UTF-8 CSV bytes with a header row into a table.
///
/// Bytes that are not valid UTF-8 are an error, never replaced.
pub fn parse_csv(bytes: &[u8]) -> std::result::Result<Table, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let names = normalize_headers(headers.iter().map(|h| Some(h.to_string())).collect());

    let mut values: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
    let mut row_count = 0;
    for record in reader.records() {
        let record = record?;
        row_count += 1;
        for (index, column) in values.iter_mut().enumerate() {
            column.push(record.get(index).map_or(CellValue::Null, parse_field));
        }
    }

    let mut table = Table::with_row_count(row_count);
    for (name, column) in names.into_iter().zip(values) {
        table.push_column_fitted(Column::new(name, column));
    }
    Ok(table)
}

/// Infer a scalar from CSV text.
pub fn parse_field(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Null;
    }
    if let Ok(value) = field.parse::<i64>() {
        return CellValue::Int(value);
    }
    if let Ok(value) = field.parse::<f64>()
        && value.is_finite()
    {
        return CellValue::Float(value);
    }
    match field {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(field.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field(""), CellValue::Null);
        assert_eq!(parse_field("42"), CellValue::Int(42));
        assert_eq!(parse_field("2.5"), CellValue::Float(2.5));
        assert_eq!(parse_field("TRUE"), CellValue::Bool(true));
        assert_eq!(parse_field("inf"), CellValue::Text("inf".into()));
        assert_eq!(parse_field("Ankara"), CellValue::Text("Ankara".into()));
    }

    #[test]
    fn test_parse_csv_pads_short_rows() {
        let table = parse_csv("Ad,Sehir,Yas\nAli,Ankara,30\nAyşe,İzmir\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["Ad", "Sehir", "Yas"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("Yas").unwrap().values,
            vec![CellValue::Int(30), CellValue::Null]
        );
    }

    #[test]
    fn test_parse_csv_quoted_fields() {
        let table = parse_csv(b"\"Ad, Soyad\",Not\n\"Veli, Ali\",\"a \"\"b\"\"\"\n").unwrap();
        assert_eq!(table.column_names(), vec!["Ad, Soyad", "Not"]);
        assert_eq!(
            table.column("Not").unwrap().values,
            vec![CellValue::Text("a \"b\"".into())]
        );
    }

    #[test]
    fn test_parse_csv_rejects_invalid_utf8() {
        // Windows-1254 "Şehir" / "İzmir"
        assert!(parse_csv(b"\xdeehir\n\xddzmir\n").is_err());
        assert!(parse_csv(b"Sehir\n\xddzmir\n").is_err());
    }
}
