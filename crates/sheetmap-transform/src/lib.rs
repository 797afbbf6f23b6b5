//! Transform engine for sheetmap.
//!
//! Produces an output table whose columns are exactly the target columns, in
//! target order, with one row per source row. Rules referencing a column that
//! is missing from the source yield null columns instead of errors so that a
//! stale template never blocks a run.

use tracing::{debug, warn};

use sheetmap_model::{CellValue, Column, Mapping, Rule, Table};

/// Counts describing how each output column was resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Output columns copied from the source.
    pub sourced: usize,
    /// Output columns filled with a manual literal.
    pub manual: usize,
    /// Output columns left blank by rule (or by having no rule).
    pub blank: usize,
    /// `(target, source)` pairs whose source column does not exist.
    pub missing_sources: Vec<(String, String)>,
}

/// Apply `mapping` to `source`, producing a table in `target_columns` order.
///
/// Targets without a rule are blank. Duplicate target names produce duplicate
/// output columns, each resolved independently. `source` is not modified.
pub fn transform(source: &Table, target_columns: &[String], mapping: &Mapping) -> Table {
    transform_with_report(source, target_columns, mapping).0
}

/// Like [`transform`], also reporting how each column was resolved.
pub fn transform_with_report(
    source: &Table,
    target_columns: &[String],
    mapping: &Mapping,
) -> (Table, TransformReport) {
    let mut output = Table::with_row_count(source.row_count());
    let mut report = TransformReport::default();
    let blank = Rule::Blank;

    for target in target_columns {
        let rule = mapping.get(target).unwrap_or(&blank);
        match rule {
            Rule::Source(column) if !source.has_column(column) => {
                warn!(target_column = %target, source_column = %column, "source column not found, filling with nulls");
                report
                    .missing_sources
                    .push((target.clone(), column.clone()));
            }
            Rule::Source(_) => report.sourced += 1,
            Rule::Manual(_) => report.manual += 1,
            Rule::Blank => report.blank += 1,
        }
        output.push_column_fitted(resolve_column(source, target, rule));
    }

    debug!(
        rows = output.row_count(),
        columns = output.column_count(),
        sourced = report.sourced,
        manual = report.manual,
        blank = report.blank,
        missing = report.missing_sources.len(),
        "transform complete"
    );
    (output, report)
}

/// Build the output column for one target under one rule.
pub fn resolve_column(source: &Table, target: &str, rule: &Rule) -> Column {
    let rows = source.row_count();
    match rule {
        Rule::Source(column) => match source.column(column) {
            Some(found) => Column::new(target, found.values.clone()),
            None => Column::nulls(target, rows),
        },
        Rule::Manual(value) => Column::repeat(target, CellValue::Text(value.clone()), rows),
        Rule::Blank => Column::nulls(target, rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Table {
        Table::from_columns(vec![
            Column::new("A", vec![CellValue::Int(1), CellValue::Int(2)]),
            Column::new("B", vec!["x".into(), CellValue::Null]),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_source_copies_values() {
        let column = resolve_column(&source(), "X", &Rule::source("A"));
        assert_eq!(column.name, "X");
        assert_eq!(column.values, vec![CellValue::Int(1), CellValue::Int(2)]);
    }

    #[test]
    fn test_resolve_missing_source_is_null() {
        let column = resolve_column(&source(), "X", &Rule::source("Z"));
        assert_eq!(column.values, vec![CellValue::Null, CellValue::Null]);
    }

    #[test]
    fn test_report_counts() {
        let mut mapping = Mapping::new();
        mapping.insert("S".into(), Rule::source("A"));
        mapping.insert("M".into(), Rule::manual("k"));
        mapping.insert("Z".into(), Rule::source("Yok"));
        let targets: Vec<String> = ["S", "M", "Z", "N"].iter().map(|s| s.to_string()).collect();

        let (table, report) = transform_with_report(&source(), &targets, &mapping);
        assert_eq!(table.column_names(), targets);
        assert_eq!(report.sourced, 1);
        assert_eq!(report.manual, 1);
        assert_eq!(report.blank, 1);
        assert_eq!(
            report.missing_sources,
            vec![("Z".to_string(), "Yok".to_string())]
        );
    }
}
