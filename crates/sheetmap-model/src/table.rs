//! In-memory tabular data: cells, columns, tables and workbooks.
//!
//! Cell values are opaque to the mapping core. They are carried from the
//! source table to the output table without any coercion.

use std::fmt;

use crate::error::{ModelError, Result};

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Null marker (empty cell, blank rule, missing source column).
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Date/time kept in its textual (ISO 8601) form.
    DateTime(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text for display and header coercion. Null renders as an empty string.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) | Self::DateTime(v) => f.write_str(v),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A named, ordered sequence of cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column of `len` null markers.
    pub fn nulls(name: impl Into<String>, len: usize) -> Self {
        Self::new(name, vec![CellValue::Null; len])
    }

    /// Column repeating `value` for `len` rows.
    pub fn repeat(name: impl Into<String>, value: CellValue, len: usize) -> Self {
        Self::new(name, vec![value; len])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered sequence of equally long columns.
///
/// Column names are not required to be unique. The row count is stored
/// explicitly so that a table without columns still knows its height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    row_count: usize,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table with a fixed row count.
    pub fn with_row_count(row_count: usize) -> Self {
        Self {
            row_count,
            columns: Vec::new(),
        }
    }

    /// Build a table from columns; the first column fixes the row count.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        let mut table = Self::with_row_count(row_count);
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Append a column, rejecting columns whose length differs from the row count.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if column.len() != self.row_count {
            return Err(ModelError::ColumnLength {
                column: column.name,
                expected: self.row_count,
                found: column.values.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Append a column, padding with nulls or truncating it to the row count.
    pub fn push_column_fitted(&mut self, mut column: Column) {
        column.values.resize(self.row_count, CellValue::Null);
        self.columns.push(column);
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count {
            return None;
        }
        self.columns.iter().map(|c| c.values.get(index)).collect()
    }

    /// First `n` rows of every column.
    pub fn head(&self, n: usize) -> Self {
        let row_count = n.min(self.row_count);
        Self {
            row_count,
            columns: self
                .columns
                .iter()
                .map(|c| {
                    let values = c.values.iter().take(row_count).cloned().collect();
                    Column::new(c.name.clone(), values)
                })
                .collect(),
        }
    }
}

/// One named sheet of a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub table: Table,
}

/// Sheets of a spreadsheet file, in workbook order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Table> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.table)
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// Pick a sheet by name, or the first sheet when no name is given.
    pub fn select(&self, name: Option<&str>) -> Result<&Sheet> {
        match name {
            Some(name) => self
                .sheets
                .iter()
                .find(|s| s.name == name)
                .ok_or_else(|| ModelError::SheetNotFound {
                    sheet: name.to_string(),
                    available: self.sheet_names(),
                }),
            None => self.first_sheet().ok_or(ModelError::EmptyWorkbook),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::new("A", vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)]),
            Column::new("B", vec!["x".into(), CellValue::Null, "z".into()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let err = Table::from_columns(vec![
            Column::new("A", vec![CellValue::Int(1)]),
            Column::new("B", vec![CellValue::Int(1), CellValue::Int(2)]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::ColumnLength {
                column: "B".to_string(),
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_empty_table_keeps_row_count() {
        let table = Table::with_row_count(4);
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.column_count(), 0);
        assert!(table.row(3).is_some());
        assert!(table.row(4).is_none());
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let table = Table::from_columns(vec![
            Column::new("A", vec![CellValue::Int(1)]),
            Column::new("A", vec![CellValue::Int(2)]),
        ])
        .unwrap();
        assert_eq!(table.column_names(), vec!["A", "A"]);
        assert_eq!(table.column("A").unwrap().values, vec![CellValue::Int(1)]);
    }

    #[test]
    fn test_push_column_fitted() {
        let mut table = Table::with_row_count(2);
        table.push_column_fitted(Column::new("A", vec![CellValue::Int(1)]));
        table.push_column_fitted(Column::nulls("B", 5));
        assert_eq!(
            table.column("A").unwrap().values,
            vec![CellValue::Int(1), CellValue::Null]
        );
        assert_eq!(table.column("B").unwrap().len(), 2);
    }

    #[test]
    fn test_head_truncates() {
        let head = sample().head(2);
        assert_eq!(head.row_count(), 2);
        assert_eq!(head.column("B").unwrap().values.len(), 2);
        assert_eq!(sample().head(10).row_count(), 3);
    }

    #[test]
    fn test_row_bounds() {
        let table = sample();
        assert_eq!(table.row(2).as_ref().map(Vec::len), Some(table.column_count()));
        assert_eq!(table.row(3), None);
        let columnless = Table::with_row_count(4);
        assert_eq!(columnless.row(1), Some(Vec::new()));
        assert_eq!(columnless.head(2).row_count(), 2);
    }

    #[test]
    fn test_display_null_is_empty() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Text("Ankara".into()).to_string(), "Ankara");
    }

    #[test]
    fn test_workbook_select() {
        let workbook = Workbook::new(vec![
            Sheet {
                name: "Sayfa1".to_string(),
                table: sample(),
            },
            Sheet {
                name: "Sayfa2".to_string(),
                table: Table::default(),
            },
        ]);
        assert_eq!(workbook.select(None).unwrap().name, "Sayfa1");
        assert_eq!(workbook.select(Some("Sayfa2")).unwrap().name, "Sayfa2");
        assert!(matches!(
            workbook.select(Some("Missing")),
            Err(ModelError::SheetNotFound { .. })
        ));
        assert_eq!(
            Workbook::default().select(None).unwrap_err(),
            ModelError::EmptyWorkbook
        );
    }
}
