//! Error types for template storage and mapping sessions.

use std::path::PathBuf;

use thiserror::Error;

/// Template store error.
///
/// Only `load` reports missing or unreadable documents; callers are expected
/// to show [`StoreError::user_message`] and continue with an empty mapping.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document is stored under the identifier.
    #[error("template not found: {id}")]
    NotFound { id: String, path: PathBuf },

    /// The stored payload is not a template document.
    #[error("template '{id}' is corrupt: {source}")]
    Corrupt {
        id: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File system operation failed.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be encoded.
    #[error("failed to serialize template '{id}'")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { id, .. } => {
                format!("The template '{id}' does not exist. Continuing with an empty mapping.")
            }
            Self::Corrupt { id, .. } => {
                format!("The template '{id}' could not be read. Continuing with an empty mapping.")
            }
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} {}", operation, path.display())
            }
            Self::Serialize { id, .. } => {
                format!("An error occurred while saving the template '{id}'.")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NotFound { .. } => Some("Run `templates list` to see saved templates.".into()),
            Self::Corrupt { path, .. } => Some(format!(
                "Fix or delete {} and save the template again.",
                path.display()
            )),
            Self::Io { .. } => {
                Some("Check that the templates directory exists and is writable.".into())
            }
            Self::Serialize { .. } => None,
        }
    }
}

/// Errors from mapping session edits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Target column is not part of the target table.
    #[error("unknown target column: {0}")]
    UnknownTarget(String),

    /// Target column is filtered out of the current view.
    #[error("target column '{0}' is not visible with the current filter")]
    HiddenTarget(String),

    /// Selected option is neither a marker nor a source column.
    #[error("'{option}' is not a valid choice for '{target}'")]
    UnknownOption { target: String, option: String },
}

/// Result type for template store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StoreError::NotFound {
            id: "musteri".to_string(),
            path: PathBuf::from("templates/musteri.json"),
        };
        assert_eq!(err.to_string(), "template not found: musteri");
        assert!(err.user_message().contains("empty mapping"));
        assert!(err.suggestion().is_some());
    }
}
