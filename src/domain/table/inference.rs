// ============================================================
// TYPE INFERENCE
// ============================================================
// Deterministic mapping from raw cell strings to typed columns.
//
// A raw cell is missing when absent, blank, or an NA marker.
// A column is numeric when it has rows and every present cell parses
// as a non-NaN f64; otherwise it is text and keeps the raw strings.

use std::collections::HashSet;

use super::{CellValue, Column, ColumnType};

/// Strings read as missing values, compared after trimming
pub const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing_marker(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || NA_MARKERS.contains(&trimmed)
}

/// Parse a present cell as a number
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Build a typed column from raw cells (`None` = absent)
pub fn infer_column(name: impl Into<String>, raw: Vec<Option<String>>) -> Column {
    let present: Vec<Option<String>> = raw
        .into_iter()
        .map(|cell| cell.filter(|value| !is_missing_marker(value)))
        .collect();

    let numeric = !present.is_empty()
        && present
            .iter()
            .flatten()
            .all(|value| parse_number(value).is_some());

    if numeric {
        let cells = present
            .iter()
            .map(|cell| {
                cell.as_deref()
                    .and_then(parse_number)
                    .map(CellValue::Number)
                    .unwrap_or(CellValue::Missing)
            })
            .collect();
        Column::new(name, ColumnType::Numeric, cells)
    } else {
        let cells = present
            .into_iter()
            .map(|cell| cell.map(CellValue::Text).unwrap_or(CellValue::Missing))
            .collect();
        Column::new(name, ColumnType::Text, cells)
    }
}

/// Make header names usable: blanks become `Unnamed: <idx>`, repeats get `.N`
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut headers = Vec::with_capacity(raw.len());

    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}
