use std::fs;

use calamine::{Data, Reader, Xlsx, open_workbook};
use tempfile::tempdir;

use sheetmap_model::{CellValue, Column, Table};
use sheetmap_output::{OUTPUT_SHEET_NAME, OutputError, output_xlsx_bytes, write_output};

fn output_table() -> Table {
    Table::from_columns(vec![
        Column::new("Musteri", vec!["Ali".into(), "Ayşe".into()]),
        Column::new("Tutar", vec![CellValue::Int(10), CellValue::Float(2.5)]),
        Column::nulls("Not", 2),
        Column::new("Musteri", vec![CellValue::Bool(true), CellValue::Null]),
    ])
    .unwrap()
}

#[test]
fn xlsx_has_single_output_sheet_with_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cikti.xlsx");
    write_output(&output_table(), &path).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec![OUTPUT_SHEET_NAME.to_string()]);

    let range = workbook.worksheet_range(OUTPUT_SHEET_NAME).unwrap();
    let rows: Vec<Vec<Data>> = range.rows().map(<[Data]>::to_vec).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        vec![
            Data::String("Musteri".into()),
            Data::String("Tutar".into()),
            Data::String("Not".into()),
            Data::String("Musteri".into()),
        ]
    );
    assert_eq!(rows[1][0], Data::String("Ali".into()));
    assert!(matches!(rows[1][1], Data::Float(v) if v == 10.0) || rows[1][1] == Data::Int(10));
    assert_eq!(rows[1][2], Data::Empty);
    assert_eq!(rows[1][3], Data::Bool(true));
    assert_eq!(rows[2][1], Data::Float(2.5));
}

#[test]
fn csv_output_writes_empty_nulls() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cikti.csv");
    write_output(&output_table(), &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "Musteri,Tutar,Not,Musteri\nAli,10,,true\nAyşe,2.5,,\n"
    );
}

#[test]
fn header_only_output_for_empty_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bos.csv");
    let mut table = Table::with_row_count(0);
    table.push_column(Column::nulls("Musteri", 0)).unwrap();
    write_output(&table, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Musteri\n");
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let err = write_output(&output_table(), &dir.path().join("cikti.json")).unwrap_err();
    assert!(matches!(err, OutputError::UnsupportedFormat { .. }));
}

#[test]
fn table_wider_than_a_worksheet_is_rejected() {
    let mut table = Table::with_row_count(1);
    for index in 0..16_385 {
        table.push_column(Column::nulls(format!("K{index}"), 1)).unwrap();
    }
    let err = output_xlsx_bytes(&table).unwrap_err();
    assert!(matches!(
        err,
        OutputError::TooLarge {
            rows: 1,
            columns: 16_385
        }
    ));
}
