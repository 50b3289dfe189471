use std::collections::HashSet;

use super::inference::{infer_column, normalize_headers};
use super::{CellKey, CellValue, Column};
use crate::domain::error::{AppError, Result};

/// In-memory table: ordered, uniquely named, equal-length columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create a table, checking name uniqueness and column lengths
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        Self::with_row_count(columns, row_count)
    }

    /// Like [`Table::new`] but keeps a row count even with zero columns
    pub fn with_row_count(columns: Vec<Column>, row_count: usize) -> Result<Self> {
        let mut names = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !names.insert(column.name()) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate column name: {}",
                    column.name()
                )));
            }
            if column.len() != row_count {
                return Err(AppError::ValidationError(format!(
                    "Column '{}' has {} rows, expected {}",
                    column.name(),
                    column.len(),
                    row_count
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Build a typed table from a header row and raw data rows.
    /// Short rows are padded with missing cells.
    pub fn from_raw_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let headers = normalize_headers(headers);
        let width = headers.len();
        let row_count = rows.len();

        let mut raw_columns: Vec<Vec<Option<String>>> =
            (0..width).map(|_| Vec::with_capacity(row_count)).collect();

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(AppError::ParseError(format!(
                    "Row {} has {} fields, header has {}",
                    idx + 1,
                    row.len(),
                    width
                )));
            }
            let mut cells = row.into_iter();
            for column in raw_columns.iter_mut() {
                column.push(cells.next().flatten());
            }
        }

        let columns = headers
            .into_iter()
            .zip(raw_columns)
            .map(|(name, raw)| infer_column(name, raw))
            .collect();

        Self::with_row_count(columns, row_count)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.is_numeric())
    }

    /// Cells of one row in column order
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells()[index]).collect())
    }

    /// First `n` rows, cloned, for previews
    pub fn head(&self, n: usize) -> Vec<Vec<CellValue>> {
        (0..self.row_count.min(n))
            .map(|row| self.columns.iter().map(|c| c.cells()[row].clone()).collect())
            .collect()
    }

    /// Drop rows equal to an earlier row, keeping the first occurrence
    pub fn drop_duplicates(self) -> Self {
        let keep: Vec<bool> = {
            let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(self.row_count);
            (0..self.row_count)
                .map(|row| {
                    let key = self.columns.iter().map(|c| c.cells()[row].key()).collect();
                    seen.insert(key)
                })
                .collect()
        };

        let row_count = keep.iter().filter(|keep| **keep).count();
        if row_count == self.row_count {
            return self;
        }

        let columns = self
            .columns
            .into_iter()
            .map(|column| column.retain_rows(&keep))
            .collect();

        Self { columns, row_count }
    }

    /// Fill missing cells of numeric columns with that column's mean
    pub fn fill_missing_with_mean(self) -> Self {
        let columns = self
            .columns
            .into_iter()
            .map(Column::fill_missing_with_mean)
            .collect();

        Self {
            columns,
            row_count: self.row_count,
        }
    }

    /// New table holding only `names`, in that order
    pub fn select_columns(&self, names: &[String]) -> Result<Self> {
        let mut chosen = HashSet::with_capacity(names.len());
        let mut columns = Vec::with_capacity(names.len());

        for name in names {
            if !chosen.insert(name.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Column selected more than once: {}",
                    name
                )));
            }
            let column = self.column(name).ok_or_else(|| {
                AppError::ValidationError(format!("Unknown column: {}", name))
            })?;
            columns.push(column.clone());
        }

        Ok(Self {
            columns,
            row_count: self.row_count,
        })
    }
}
