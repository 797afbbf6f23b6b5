//! Mapping session state for interactive mapping workflows.
//!
//! A session holds the target and source column lists, the prefill rules
//! from a loaded template and the live choices made for the columns that are
//! currently visible. [`MappingSession::resolve`] always yields one rule per
//! target column, however narrow the search filter is.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use sheetmap_model::{Mapping, Rule, RuleMarkers, TemplateDocument};

use crate::error::SessionError;

/// A selection for one target column, as offered by a mapping UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnChoice {
    /// Leave the column empty.
    Blank,
    /// Constant value; the payload is the (editable) literal.
    Manual(String),
    /// Copy a source column.
    Source(String),
}

impl ColumnChoice {
    /// Option label shown for this choice.
    pub fn label<'a>(&'a self, markers: &'a RuleMarkers) -> &'a str {
        match self {
            Self::Blank => &markers.blank,
            Self::Manual(_) => &markers.manual,
            Self::Source(column) => column,
        }
    }

    pub fn into_rule(self) -> Rule {
        match self {
            Self::Blank => Rule::Blank,
            Self::Manual(value) => Rule::Manual(value),
            Self::Source(column) => Rule::Source(column),
        }
    }
}

/// State of a mapping session between one source and one target table.
#[derive(Debug, Clone)]
pub struct MappingSession {
    target_columns: Vec<String>,
    source_columns: Vec<String>,
    markers: RuleMarkers,
    /// Normalized rules from the loaded template (empty if none).
    prefill: Mapping,
    /// Live choices for visible target columns.
    edits: BTreeMap<String, ColumnChoice>,
    /// Case-insensitive substring filter over target column names.
    search_filter: String,
}

impl MappingSession {
    pub fn new(
        target_columns: Vec<String>,
        source_columns: Vec<String>,
        markers: RuleMarkers,
    ) -> Self {
        Self {
            target_columns,
            source_columns,
            markers,
            prefill: Mapping::new(),
            edits: BTreeMap::new(),
            search_filter: String::new(),
        }
    }

    /// Use already normalized rules as prefill.
    #[must_use]
    pub fn with_prefill(mut self, prefill: Mapping) -> Self {
        self.prefill = prefill;
        self
    }

    /// Use a loaded template's mapping as prefill.
    #[must_use]
    pub fn with_template(self, document: &TemplateDocument) -> Self {
        let prefill = document.prefill(&self.markers);
        self.with_prefill(prefill)
    }

    pub fn target_columns(&self) -> &[String] {
        &self.target_columns
    }

    pub fn source_columns(&self) -> &[String] {
        &self.source_columns
    }

    pub fn markers(&self) -> &RuleMarkers {
        &self.markers
    }

    pub fn search_filter(&self) -> &str {
        &self.search_filter
    }

    /// Selectable options: the two markers followed by the source columns.
    pub fn options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.source_columns.len() + 2);
        options.push(self.markers.blank.clone());
        options.push(self.markers.manual.clone());
        options.extend(self.source_columns.iter().cloned());
        options
    }

    fn is_option(&self, value: &str) -> bool {
        self.markers.is_marker(value) || self.source_columns.iter().any(|c| c == value)
    }

    /// Change the search filter.
    ///
    /// Live choices of columns that drop out of view are discarded; hidden
    /// columns always fall back to their prefill rule.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.search_filter = filter.into();
        let visible: BTreeSet<String> = self.visible_targets().into_iter().collect();
        self.edits.retain(|target, _| visible.contains(target));
    }

    /// Target columns matching the current filter, in target order.
    pub fn visible_targets(&self) -> Vec<String> {
        filter_targets(&self.target_columns, &self.search_filter)
    }

    fn is_visible(&self, target: &str) -> bool {
        self.visible_targets().iter().any(|t| t == target)
    }

    /// Normalized prefill rule for a target (blank when absent).
    pub fn prefill_rule(&self, target: &str) -> Rule {
        self.prefill.get(target).cloned().unwrap_or_default()
    }

    /// Initial selection for a target column, derived from its prefill rule.
    ///
    /// A source column that is no longer among the options falls back to
    /// blank; the user has to pick again.
    pub fn default_choice(&self, target: &str) -> ColumnChoice {
        match self.prefill_rule(target) {
            Rule::Blank => ColumnChoice::Blank,
            Rule::Manual(value) => ColumnChoice::Manual(value),
            Rule::Source(column) if self.is_option(&column) => {
                self.choice_for_option(&column, String::new())
            }
            Rule::Source(column) => {
                debug!(target_column = %target, source_column = %column, "prefill source column unavailable, defaulting to blank");
                ColumnChoice::Blank
            }
        }
    }

    fn choice_for_option(&self, option: &str, manual_value: String) -> ColumnChoice {
        if option == self.markers.blank {
            ColumnChoice::Blank
        } else if option == self.markers.manual {
            ColumnChoice::Manual(manual_value)
        } else {
            ColumnChoice::Source(option.to_string())
        }
    }

    /// Current selection: the live choice if any, otherwise the default.
    pub fn current_choice(&self, target: &str) -> ColumnChoice {
        self.edits
            .get(target)
            .cloned()
            .unwrap_or_else(|| self.default_choice(target))
    }

    /// Record a live choice for a visible target column.
    pub fn choose(&mut self, target: &str, choice: ColumnChoice) -> Result<(), SessionError> {
        if !self.target_columns.iter().any(|t| t == target) {
            return Err(SessionError::UnknownTarget(target.to_string()));
        }
        if !self.is_visible(target) {
            return Err(SessionError::HiddenTarget(target.to_string()));
        }
        debug!(target_column = %target, choice = ?choice, "column choice");
        self.edits.insert(target.to_string(), choice);
        Ok(())
    }

    /// Record a choice by option label, as a select box would report it.
    ///
    /// `manual_value` is the literal typed for the manual marker; when absent
    /// the prefill literal (if the prefill is manual) is kept.
    pub fn choose_option(
        &mut self,
        target: &str,
        option: &str,
        manual_value: Option<&str>,
    ) -> Result<(), SessionError> {
        if !self.is_option(option) {
            return Err(SessionError::UnknownOption {
                target: target.to_string(),
                option: option.to_string(),
            });
        }
        let manual_value = match manual_value {
            Some(value) => value.to_string(),
            None => match self.prefill_rule(target) {
                Rule::Manual(value) => value,
                _ => String::new(),
            },
        };
        let choice = self.choice_for_option(option, manual_value);
        self.choose(target, choice)
    }

    /// Forget the live choice for a target, restoring its default.
    pub fn reset(&mut self, target: &str) -> bool {
        self.edits.remove(target).is_some()
    }

    /// Complete mapping: live choices for visible columns, prefill for the rest.
    pub fn resolve(&self) -> Mapping {
        let visible = self.visible_targets();
        let live: Mapping = visible
            .iter()
            .map(|target| (target.clone(), self.current_choice(target).into_rule()))
            .collect();
        merge_mapping(&self.target_columns, &visible, &self.prefill, &live)
    }

    /// Template payload for the given resolved mapping.
    pub fn to_document(
        &self,
        source_sheet: &str,
        target_sheet: &str,
        mapping: &Mapping,
    ) -> TemplateDocument {
        TemplateDocument::new(
            source_sheet,
            target_sheet,
            self.source_columns.clone(),
            self.target_columns.clone(),
            mapping,
        )
    }

    /// Summary counts for a resolved mapping.
    pub fn summary(&self, mapping: &Mapping) -> MappingSummary {
        MappingSummary::from_mapping(mapping, self.target_columns.len())
    }
}

/// Target columns whose name contains `filter` (case-insensitive).
///
/// A blank filter selects every column.
pub fn filter_targets(target_columns: &[String], filter: &str) -> Vec<String> {
    let needle = filter.trim().to_lowercase();
    target_columns
        .iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Merge live rules for visible columns over the prefill.
///
/// Every name in `target_columns` receives exactly one rule: the live rule
/// when the column is visible and edited, otherwise its prefill rule, and
/// [`Rule::Blank`] when neither exists.
pub fn merge_mapping(
    target_columns: &[String],
    visible: &[String],
    prefill: &Mapping,
    live: &Mapping,
) -> Mapping {
    let visible: BTreeSet<&str> = visible.iter().map(String::as_str).collect();
    target_columns
        .iter()
        .map(|target| {
            let rule = live
                .get(target)
                .filter(|_| visible.contains(target.as_str()))
                .or_else(|| prefill.get(target))
                .cloned()
                .unwrap_or_default();
            (target.clone(), rule)
        })
        .collect()
}

/// Summary of mapping counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSummary {
    /// Distinct source columns referenced plus manual columns with a value.
    pub filled: usize,
    /// Number of target columns.
    pub total: usize,
    /// Target columns with a non-empty manual value.
    pub manual_columns: Vec<String>,
}

impl MappingSummary {
    pub fn from_mapping(mapping: &Mapping, total: usize) -> Self {
        let sources: BTreeSet<&str> = mapping
            .values()
            .filter_map(|rule| match rule {
                Rule::Source(column) => Some(column.as_str()),
                _ => None,
            })
            .collect();
        let manual_columns: Vec<String> = mapping
            .iter()
            .filter(|(_, rule)| matches!(rule, Rule::Manual(value) if !value.trim().is_empty()))
            .map(|(target, _)| target.clone())
            .collect();
        Self {
            filled: sources.len() + manual_columns.len(),
            total,
            manual_columns,
        }
    }
}
