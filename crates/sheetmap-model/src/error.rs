//! Error types for the sheetmap data model.

use thiserror::Error;

/// Errors raised when building or querying model values.
///
/// Rule normalization never fails; these errors only concern table shape
/// and sheet selection at the workbook boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A column does not have the table's row count.
    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Requested sheet is not part of the workbook.
    #[error("sheet '{sheet}' not found (available: {})", available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// Workbook contains no sheets at all.
    #[error("workbook has no sheets")]
    EmptyWorkbook,
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
