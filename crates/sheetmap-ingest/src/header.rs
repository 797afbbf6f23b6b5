//! Header row coercion.

use std::collections::BTreeSet;

/// Turn raw header cells into unique column names.
///
/// Empty headers become `Unnamed: <index>`. Repeated names get `.1`, `.2`, ...
/// suffixes in order of appearance, skipping suffixes already taken.
pub fn normalize_headers(raw: Vec<Option<String>>) -> Vec<String> {
    let named: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Some(value) if !value.is_empty() => value,
            _ => format!("Unnamed: {index}"),
        })
        .collect();

    let mut taken: BTreeSet<String> = BTreeSet::new();
    let mut columns = Vec::with_capacity(named.len());
    for name in named {
        let mut candidate = name.clone();
        let mut suffix = 0;
        while taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{name}.{suffix}");
        }
        taken.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}

/// Render a numeric header the way a spreadsheet shows it (`2024`, not `2024.0`).
pub fn number_header(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_empty_headers_are_unnamed() {
        let columns = normalize_headers(raw(&[Some("Ad"), None, Some("")]));
        assert_eq!(columns, vec!["Ad", "Unnamed: 1", "Unnamed: 2"]);
    }

    #[test]
    fn test_duplicates_get_suffixes() {
        let columns = normalize_headers(raw(&[Some("A"), Some("A"), Some("A.1"), Some("A")]));
        assert_eq!(columns, vec!["A", "A.1", "A.1.1", "A.2"]);
    }

    #[test]
    fn test_number_header() {
        assert_eq!(number_header(2024.0), "2024");
        assert_eq!(number_header(1.5), "1.5");
    }
}
