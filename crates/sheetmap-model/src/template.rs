//! Persisted template document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rule::{Mapping, RuleMarkers, normalize_mapping};

/// A named mapping plus the context it was built in.
///
/// The column snapshots are informational only. A template may be applied to
/// files whose columns no longer match them.
///
/// Mapping entries are kept in their stored JSON form so that documents from
/// every schema generation load; use [`TemplateDocument::prefill`] to obtain
/// canonical rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    #[serde(default)]
    pub source_sheet: String,
    #[serde(default)]
    pub target_sheet: String,
    #[serde(default)]
    pub source_columns_snapshot: Vec<String>,
    #[serde(default)]
    pub target_columns_snapshot: Vec<String>,
    #[serde(default)]
    pub mapping: BTreeMap<String, Value>,
    /// Set by the template store on save (local time, second precision).
    #[serde(rename = "_saved_at", default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl TemplateDocument {
    /// Build a document from canonical rules, written in the structured format.
    pub fn new(
        source_sheet: impl Into<String>,
        target_sheet: impl Into<String>,
        source_columns: Vec<String>,
        target_columns: Vec<String>,
        mapping: &Mapping,
    ) -> Self {
        Self {
            source_sheet: source_sheet.into(),
            target_sheet: target_sheet.into(),
            source_columns_snapshot: source_columns,
            target_columns_snapshot: target_columns,
            mapping: mapping
                .iter()
                .map(|(target, rule)| (target.clone(), rule.to_value()))
                .collect(),
            saved_at: None,
        }
    }

    /// Canonical rules for every stored entry.
    pub fn prefill(&self, markers: &RuleMarkers) -> Mapping {
        normalize_mapping(&self.mapping, markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    #[test]
    fn test_legacy_document_parses_and_normalizes() {
        let json = r#"{
            "source_sheet": "Sheet1",
            "target_sheet": "Sheet1",
            "source_columns_snapshot": ["Ad", "Soyad"],
            "target_columns_snapshot": ["Musteri", "Not", "Ulke"],
            "mapping": {"Musteri": "Ad", "Not": "(Boş)", "Ulke": "(Manuel Değer Gir)"}
        }"#;
        let doc: TemplateDocument = serde_json::from_str(json).unwrap();
        assert!(doc.saved_at.is_none());

        let prefill = doc.prefill(&RuleMarkers::default());
        assert_eq!(prefill["Musteri"], Rule::source("Ad"));
        assert_eq!(prefill["Not"], Rule::Blank);
        assert_eq!(prefill["Ulke"], Rule::manual(""));
    }

    #[test]
    fn test_missing_fields_default() {
        let doc: TemplateDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, TemplateDocument::default());
    }

    #[test]
    fn test_saved_at_uses_underscore_key() {
        let mut doc = TemplateDocument::new("S", "T", vec![], vec![], &Mapping::new());
        doc.saved_at = Some("2024-05-01T10:00:00".to_string());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["_saved_at"], "2024-05-01T10:00:00");
        assert!(value.get("saved_at").is_none());
    }

    #[test]
    fn test_new_writes_structured_rules() {
        let mut mapping = Mapping::new();
        mapping.insert("Il".to_string(), Rule::source("Sehir"));
        mapping.insert("Ulke".to_string(), Rule::manual("TR"));
        let doc = TemplateDocument::new("S", "T", vec![], vec![], &mapping);
        insta::assert_json_snapshot!(doc.mapping, @r#"
        {
          "Il": {
            "type": "source",
            "value": "Sehir"
          },
          "Ulke": {
            "type": "manual",
            "value": "TR"
          }
        }
        "#);
    }
}
