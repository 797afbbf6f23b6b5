//! CLI library components for sheetmap.

pub mod logging;
pub mod pipeline;
pub mod types;
