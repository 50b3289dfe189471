// ============================================================
// CELL VALUES
// ============================================================
// Typed cell content shared by every pipeline stage

use serde::Serialize;
use std::fmt;

/// A single value stored in a table column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric value (only ever present in numeric columns)
    Number(f64),

    /// Raw text as it appeared in the source file
    Text(String),

    /// Absent value, serialized as `null`
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Hashable identity used when comparing whole rows
    pub(crate) fn key(&self) -> CellKey<'_> {
        match self {
            // 0.0 and -0.0 compare equal, so they must share a key
            CellValue::Number(value) if *value == 0.0 => CellKey::Number(0f64.to_bits()),
            CellValue::Number(value) => CellKey::Number(value.to_bits()),
            CellValue::Text(text) => CellKey::Text(text),
            CellValue::Missing => CellKey::Missing,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{}", format_number(*value)),
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Missing => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CellKey<'a> {
    Number(u64),
    Text(&'a str),
    Missing,
}

/// Shortest textual form of a number: integral values drop the fraction
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.is_infinite() {
        if value > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_signed_zero_shares_key() {
        assert_eq!(CellValue::Number(0.0).key(), CellValue::Number(-0.0).key());
        assert_ne!(CellValue::Number(1.0).key(), CellValue::Text("1".into()).key());
    }

    #[test]
    fn test_serialize_untagged() {
        let cells = vec![
            CellValue::Number(1.5),
            CellValue::Text("a".to_string()),
            CellValue::Missing,
        ];
        assert_eq!(serde_json::to_string(&cells).unwrap(), r#"[1.5,"a",null]"#);
    }
}
