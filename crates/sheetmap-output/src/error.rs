//! Error types for output serialization.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing the output table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The xlsx writer rejected a value or failed to build the package.
    #[error("failed to build xlsx output: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Failed to write CSV output.
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to write the output file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table does not fit in a single worksheet.
    #[error("output table of {rows} rows x {columns} columns exceeds the worksheet limits")]
    TooLarge { rows: usize, columns: usize },

    /// Output path has an extension we cannot write.
    #[error("unsupported output format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
