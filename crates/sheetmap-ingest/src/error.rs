//! Error types for workbook ingestion.
//!
//! Any of these is fatal for a run: no transform is attempted on a workbook
//! that could not be read.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading input workbooks.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File extension is not a supported spreadsheet format.
    #[error("unsupported file format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spreadsheet container could not be opened.
    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// A sheet inside the workbook could not be read.
    #[error("failed to read sheet '{sheet}' in {path}: {source}")]
    Sheet {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    /// CSV parsing failed.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
