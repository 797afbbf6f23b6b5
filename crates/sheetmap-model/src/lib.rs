//! Data model for sheetmap.
//!
//! - [`table`]: cells, columns, tables and workbooks
//! - [`rule`]: the Blank / Source / Manual mapping rule and its normalization
//! - [`template`]: the persisted template document

pub mod error;
pub mod rule;
pub mod table;
pub mod template;

pub use error::{ModelError, Result};
pub use rule::{
    DEFAULT_BLANK_MARKER, DEFAULT_MANUAL_MARKER, Mapping, Rule, RuleMarkers, normalize_mapping,
    normalize_rule,
};
pub use table::{CellValue, Column, Sheet, Table, Workbook};
pub use template::TemplateDocument;
