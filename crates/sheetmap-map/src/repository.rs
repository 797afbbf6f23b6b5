//! Template repository for persisting and reusing column mappings.
//!
//! This module provides a file-system based repository for storing and
//! retrieving named template documents.
//!
//! # Storage Format
//!
//! Each template is a pretty-printed UTF-8 JSON file named `{id}.json`, where
//! `id` is derived from the user-supplied name by [`sanitize_template_id`].
//! Saving under a name that derives to an existing identifier overwrites that
//! document (last writer wins; there is no locking).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;
use tracing::{debug, info};

use sheetmap_model::TemplateDocument;

use crate::error::{Result, StoreError};

/// Identifier used when a name sanitizes to nothing.
pub const DEFAULT_TEMPLATE_ID: &str = "template";

const EXTENSION: &str = "json";

/// Repository for storing and retrieving template documents.
///
/// Construct once with the configured directory and pass it by reference.
#[derive(Debug, Clone)]
pub struct TemplateRepository {
    /// Base directory for storing template files.
    base_dir: PathBuf,
}

impl TemplateRepository {
    /// Create a new repository at the given directory.
    ///
    /// The directory will be created if it doesn't exist.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(io_error("create directory", &base_dir))?;
        Ok(Self { base_dir })
    }

    /// Get the base directory of this repository.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File path for an identifier (the file may not exist).
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.{EXTENSION}", strip_extension(id)))
    }

    /// List stored template identifiers, sorted lexicographically.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let entries =
            fs::read_dir(&self.base_dir).map_err(io_error("read directory", &self.base_dir))?;
        for entry in entries {
            let path = entry
                .map_err(io_error("read directory", &self.base_dir))?
                .path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Save a template under a name, returning the derived identifier.
    ///
    /// Stamps `saved_at` with the current local time before writing and
    /// replaces any document stored under the same identifier.
    pub fn save(&self, name: &str, document: &TemplateDocument) -> Result<String> {
        let id = sanitize_template_id(name);
        let mut stored = document.clone();
        stored.saved_at = Some(Local::now().format("%Y-%m-%dT%H:%M:%S").to_string());

        let json = serde_json::to_string_pretty(&stored).map_err(|e| StoreError::Serialize {
            id: id.clone(),
            source: e,
        })?;

        let path = self.path_for(&id);
        write_atomic(&path, json.as_bytes())?;
        info!(template = %id, path = %path.display(), "saved template");
        Ok(id)
    }

    /// Load a template by identifier (with or without the `.json` suffix).
    pub fn load(&self, id: &str) -> Result<TemplateDocument> {
        let id = strip_extension(id);
        let path = self.path_for(id);
        if !is_plain_id(id) || !path.is_file() {
            return Err(StoreError::NotFound {
                id: id.to_string(),
                path,
            });
        }

        let contents = fs::read(&path).map_err(io_error("read", &path))?;
        let corrupt = |source| StoreError::Corrupt {
            id: id.to_string(),
            path: path.clone(),
            source,
        };
        let value: Value = serde_json::from_slice(&contents).map_err(corrupt)?;
        if !value.is_object() {
            return Err(corrupt(serde::de::Error::custom(
                "expected a JSON object at the top level",
            )));
        }
        let document: TemplateDocument = serde_json::from_value(value).map_err(corrupt)?;
        debug!(template = %id, entries = document.mapping.len(), "loaded template");
        Ok(document)
    }

    /// Check if a template exists.
    pub fn exists(&self, id: &str) -> bool {
        let id = strip_extension(id);
        is_plain_id(id) && self.path_for(id).is_file()
    }

    /// Delete a template from the repository.
    pub fn delete(&self, id: &str) -> Result<bool> {
        if !self.exists(id) {
            return Ok(false);
        }
        let path = self.path_for(id);
        fs::remove_file(&path).map_err(io_error("delete", &path))?;
        info!(template = %strip_extension(id), "deleted template");
        Ok(true)
    }
}

/// Derive a file-safe identifier from a template name.
///
/// Keeps alphanumerics, `-`, `_` and spaces, trims the ends and turns spaces
/// into underscores. Letters outside ASCII are transliterated when a plain
/// equivalent exists and dropped otherwise, so identifiers only contain
/// `[A-Za-z0-9_-]`. An empty result becomes [`DEFAULT_TEMPLATE_ID`].
pub fn sanitize_template_id(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ') {
                Some(c)
            } else if c.is_alphanumeric() {
                transliterate(c)
            } else {
                None
            }
        })
        .collect();
    let id = kept.trim().replace(' ', "_");
    if id.is_empty() {
        DEFAULT_TEMPLATE_ID.to_string()
    } else {
        id
    }
}

fn transliterate(c: char) -> Option<char> {
    let plain = match c {
        'ç' => 'c',
        'Ç' => 'C',
        'ğ' => 'g',
        'Ğ' => 'G',
        'ı' => 'i',
        'İ' => 'I',
        'ö' => 'o',
        'Ö' => 'O',
        'ş' => 's',
        'Ş' => 'S',
        'ü' => 'u',
        'Ü' => 'U',
        'â' | 'à' | 'á' | 'ä' => 'a',
        'Â' | 'À' | 'Á' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'î' | 'í' | 'ï' => 'i',
        'Î' | 'Í' | 'Ï' => 'I',
        'ô' | 'ó' => 'o',
        'Ô' | 'Ó' => 'O',
        'û' | 'ú' => 'u',
        'Û' | 'Ú' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        _ => return None,
    };
    Some(plain)
}

fn strip_extension(id: &str) -> &str {
    id.strip_suffix(".json").unwrap_or(id)
}

/// Identifiers never address files outside the repository directory.
fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && id != "." && id != ".."
}

/// Write through a temp file and rename so readers never see partial documents.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(io_error("create", &temp_path))?;
    file.write_all(bytes).map_err(io_error("write", &temp_path))?;
    file.sync_all().map_err(io_error("sync", &temp_path))?;
    fs::rename(&temp_path, path).map_err(io_error("rename", path))?;
    Ok(())
}

fn io_error(operation: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io {
        operation,
        path,
        source,
    }
}
