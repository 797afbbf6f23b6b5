use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use sheetmap_map::{ColumnChoice, MappingSummary};
use sheetmap_model::{Mapping, RuleMarkers, Table};
use sheetmap_transform::TransformReport;

/// A `--set TARGET=blank|source:COL|manual:VALUE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOverride {
    pub target: String,
    pub choice: ColumnChoice,
}

impl FromStr for ColumnOverride {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (target, rule) = value
            .split_once('=')
            .ok_or_else(|| format!("expected TARGET=RULE, got '{value}'"))?;
        if target.is_empty() {
            return Err(format!("missing target column in '{value}'"));
        }
        let choice = if rule == "blank" {
            ColumnChoice::Blank
        } else if let Some(column) = rule.strip_prefix("source:") {
            if column.is_empty() {
                return Err(format!("missing source column in '{value}'"));
            }
            ColumnChoice::Source(column.to_string())
        } else if let Some(literal) = rule.strip_prefix("manual:") {
            ColumnChoice::Manual(literal.to_string())
        } else {
            return Err(format!(
                "unknown rule '{rule}' (expected blank, source:COL or manual:VALUE)"
            ));
        };
        Ok(Self {
            target: target.to_string(),
            choice,
        })
    }
}

impl fmt::Display for ColumnOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.choice {
            ColumnChoice::Blank => write!(f, "{}=blank", self.target),
            ColumnChoice::Source(column) => write!(f, "{}=source:{column}", self.target),
            ColumnChoice::Manual(literal) => write!(f, "{}=manual:{literal}", self.target),
        }
    }
}

/// Inputs of one mapping run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub source: PathBuf,
    pub target: PathBuf,
    pub source_sheet: Option<String>,
    pub target_sheet: Option<String>,
    pub template: Option<String>,
    pub filter: Option<String>,
    pub overrides: Vec<ColumnOverride>,
    pub save_template: Option<String>,
    pub output: Option<PathBuf>,
    pub markers: RuleMarkers,
}

/// Everything a run produced, for reporting.
#[derive(Debug)]
pub struct RunResult {
    pub source_sheet: String,
    pub target_sheet: String,
    pub mapping: Mapping,
    pub summary: MappingSummary,
    pub report: TransformReport,
    pub output: Table,
    pub output_path: Option<PathBuf>,
    pub saved_template: Option<String>,
    /// Recoverable problems shown to the user (template load or save failures).
    pub notices: Vec<String>,
}
