//! Template storage and mapping session state for sheetmap.
//!
//! # Architecture
//!
//! - `repository` - file-system store of named template documents
//! - `state` - per-session reconciliation of template prefill and live edits
//! - `error` - store and session error types

mod error;
mod repository;
mod state;

pub use error::{Result, SessionError, StoreError};
pub use repository::{DEFAULT_TEMPLATE_ID, TemplateRepository, sanitize_template_id};
pub use state::{ColumnChoice, MappingSession, MappingSummary, filter_targets, merge_mapping};
