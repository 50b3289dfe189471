use serde::{Deserialize, Serialize};
use std::fmt;

use super::CellValue;

/// Inferred type of a whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Every present cell is a number
    Numeric,

    /// Free text (mixed content falls here too)
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "numeric"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// A named, typed sequence of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnType,
    cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnType, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnType {
        self.kind
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnType::Numeric
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_missing()).count()
    }

    /// Arithmetic mean of the present numeric cells, `None` when there are none
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .cells
            .iter()
            .filter_map(CellValue::as_number)
            .fold((0.0f64, 0usize), |(sum, count), value| (sum + value, count + 1));

        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Replace missing cells with the current mean; text columns pass through
    pub fn fill_missing_with_mean(self) -> Self {
        if !self.is_numeric() {
            return self;
        }

        let Some(mean) = self.mean() else {
            return self;
        };

        let cells = self
            .cells
            .into_iter()
            .map(|cell| match cell {
                CellValue::Missing => CellValue::Number(mean),
                other => other,
            })
            .collect();

        Self { cells, ..self }
    }

    /// Keep only the rows whose flag is set
    pub(crate) fn retain_rows(self, keep: &[bool]) -> Self {
        let cells = self
            .cells
            .into_iter()
            .zip(keep)
            .filter_map(|(cell, keep)| keep.then_some(cell))
            .collect();

        Self { cells, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(values: &[Option<f64>]) -> Column {
        let cells = values
            .iter()
            .map(|value| value.map(CellValue::Number).unwrap_or(CellValue::Missing))
            .collect();
        Column::new("v", ColumnType::Numeric, cells)
    }

    #[test]
    fn test_mean_ignores_missing() {
        let column = numeric(&[Some(1.0), None, Some(3.0)]);
        assert_eq!(column.mean(), Some(2.0));
        assert_eq!(column.missing_count(), 1);
    }

    #[test]
    fn test_fill_all_missing_is_noop() {
        let column = numeric(&[None, None]);
        let filled = column.clone().fill_missing_with_mean();
        assert_eq!(filled, column);
    }

    #[test]
    fn test_fill_leaves_text_column() {
        let column = Column::new(
            "t",
            ColumnType::Text,
            vec![CellValue::Text("a".into()), CellValue::Missing],
        );
        assert_eq!(column.clone().fill_missing_with_mean(), column);
    }

    #[test]
    fn test_retain_rows() {
        let column = numeric(&[Some(1.0), Some(2.0), Some(3.0)]);
        let kept = column.retain_rows(&[true, false, true]);
        assert_eq!(
            kept.cells(),
            &[CellValue::Number(1.0), CellValue::Number(3.0)]
        );
    }
}
