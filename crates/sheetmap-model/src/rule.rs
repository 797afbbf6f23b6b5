//! Column mapping rules and their normalization from persisted templates.
//!
//! Templates have been written in two shapes over time:
//!
//! - Legacy: `mapping[target] = "SourceCol"` or one of the UI markers
//!   (`"(Boş)"`, `"(Manuel Değer Gir)"`).
//! - Structured: `mapping[target] = {"type": "source" | "manual" | "blank", "value": "..."}`.
//!
//! [`normalize_rule`] turns any stored entry into a canonical [`Rule`]. It is
//! total: unknown or malformed entries become [`Rule::Blank`].

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Value, json};

/// Legacy marker meaning "leave the column empty".
pub const DEFAULT_BLANK_MARKER: &str = "(Boş)";

/// Legacy marker meaning "enter a constant value".
pub const DEFAULT_MANUAL_MARKER: &str = "(Manuel Değer Gir)";

/// Mapping instruction for one target column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Rule {
    /// Fill the column with null markers.
    #[default]
    Blank,
    /// Copy the named source column.
    Source(String),
    /// Broadcast a literal to every row.
    Manual(String),
}

/// Complete assignment of one rule per target column.
pub type Mapping = BTreeMap<String, Rule>;

impl Rule {
    pub fn source(column: impl Into<String>) -> Self {
        Self::Source(column.into())
    }

    pub fn manual(value: impl Into<String>) -> Self {
        Self::Manual(value.into())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Stored `type` tag.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Source(_) => "source",
            Self::Manual(_) => "manual",
        }
    }

    /// Structured (current schema) JSON form of this rule.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Blank => json!({ "type": "blank" }),
            Self::Source(column) => json!({ "type": "source", "value": column }),
            Self::Manual(value) => json!({ "type": "manual", "value": value }),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("blank"),
            Self::Source(column) => write!(f, "source:{column}"),
            Self::Manual(value) => write!(f, "manual:{value}"),
        }
    }
}

/// Marker strings used by the legacy string format and by selection UIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMarkers {
    pub blank: String,
    pub manual: String,
}

impl RuleMarkers {
    pub fn new(blank: impl Into<String>, manual: impl Into<String>) -> Self {
        Self {
            blank: blank.into(),
            manual: manual.into(),
        }
    }

    /// True if `value` is one of the two markers.
    pub fn is_marker(&self, value: &str) -> bool {
        value == self.blank || value == self.manual
    }
}

impl Default for RuleMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_BLANK_MARKER, DEFAULT_MANUAL_MARKER)
    }
}

/// Normalize one persisted mapping entry into a canonical rule.
///
/// `None` (no entry for the column) yields [`Rule::Blank`].
pub fn normalize_rule(raw: Option<&Value>, markers: &RuleMarkers) -> Rule {
    match raw {
        Some(Value::Object(object)) if object.contains_key("type") => {
            let value = || stringify(object.get("value"));
            match object.get("type").and_then(Value::as_str) {
                Some("source") => Rule::Source(value()),
                Some("manual") => Rule::Manual(value()),
                _ => Rule::Blank,
            }
        }
        Some(Value::String(legacy)) => {
            if *legacy == markers.blank {
                Rule::Blank
            } else if *legacy == markers.manual {
                // The legacy format could not carry the literal itself.
                Rule::Manual(String::new())
            } else {
                Rule::Source(legacy.clone())
            }
        }
        _ => Rule::Blank,
    }
}

/// Normalize every entry of a persisted mapping.
pub fn normalize_mapping(raw: &BTreeMap<String, Value>, markers: &RuleMarkers) -> Mapping {
    raw.iter()
        .map(|(target, entry)| (target.clone(), normalize_rule(Some(entry), markers)))
        .collect()
}

fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> RuleMarkers {
        RuleMarkers::default()
    }

    #[test]
    fn test_absent_entry_is_blank() {
        assert_eq!(normalize_rule(None, &markers()), Rule::Blank);
        assert_eq!(normalize_rule(Some(&Value::Null), &markers()), Rule::Blank);
    }

    #[test]
    fn test_structured_source_and_manual() {
        let source = json!({"type": "source", "value": "Ad"});
        let manual = json!({"type": "manual", "value": "TR"});
        assert_eq!(normalize_rule(Some(&source), &markers()), Rule::source("Ad"));
        assert_eq!(normalize_rule(Some(&manual), &markers()), Rule::manual("TR"));
    }

    #[test]
    fn test_structured_value_is_stringified() {
        let number = json!({"type": "manual", "value": 42});
        let missing = json!({"type": "source"});
        let null = json!({"type": "manual", "value": null});
        assert_eq!(normalize_rule(Some(&number), &markers()), Rule::manual("42"));
        assert_eq!(normalize_rule(Some(&missing), &markers()), Rule::source(""));
        assert_eq!(normalize_rule(Some(&null), &markers()), Rule::manual(""));
    }

    #[test]
    fn test_unknown_type_downgrades_to_blank() {
        let unknown = json!({"type": "formula", "value": "=A1"});
        let non_string = json!({"type": 7});
        assert_eq!(normalize_rule(Some(&unknown), &markers()), Rule::Blank);
        assert_eq!(normalize_rule(Some(&non_string), &markers()), Rule::Blank);
    }

    #[test]
    fn test_object_without_type_is_blank() {
        let entry = json!({"value": "Ad"});
        assert_eq!(normalize_rule(Some(&entry), &markers()), Rule::Blank);
    }

    #[test]
    fn test_other_shapes_are_blank() {
        for entry in [json!(3), json!(true), json!(["Ad"])] {
            assert_eq!(normalize_rule(Some(&entry), &markers()), Rule::Blank);
        }
    }

    #[test]
    fn test_legacy_manual_marker_has_empty_literal() {
        let entry = json!(DEFAULT_MANUAL_MARKER);
        assert_eq!(normalize_rule(Some(&entry), &markers()), Rule::manual(""));
    }

    #[test]
    fn test_custom_markers() {
        let custom = RuleMarkers::new("-", "*");
        assert_eq!(normalize_rule(Some(&json!("-")), &custom), Rule::Blank);
        assert_eq!(normalize_rule(Some(&json!("*")), &custom), Rule::manual(""));
        assert_eq!(
            normalize_rule(Some(&json!(DEFAULT_BLANK_MARKER)), &custom),
            Rule::source(DEFAULT_BLANK_MARKER)
        );
    }

    #[test]
    fn test_to_value_shape() {
        assert_eq!(Rule::Blank.to_value(), json!({"type": "blank"}));
        assert_eq!(
            Rule::source("Sehir").to_value(),
            json!({"type": "source", "value": "Sehir"})
        );
    }
}
