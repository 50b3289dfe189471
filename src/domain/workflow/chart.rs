use serde::Serialize;

use crate::domain::table::Table;

/// Most numeric columns shown in one chart
pub const MAX_CHART_SERIES: usize = 2;

/// One bar series: a numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Bar chart input: one position per row, one series per numeric column
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    /// Pick the first numeric columns of `table`, in column order
    pub fn from_table(table: &Table) -> Self {
        let series: Vec<ChartSeries> = table
            .numeric_columns()
            .take(MAX_CHART_SERIES)
            .map(|column| ChartSeries {
                name: column.name().to_string(),
                values: column.cells().iter().map(|cell| cell.as_number()).collect(),
            })
            .collect();

        if series.is_empty() {
            return Self::default();
        }

        Self {
            labels: (0..table.row_count()).map(|row| row.to_string()).collect(),
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Smallest and largest value across all series, zero included
    pub fn value_range(&self) -> (f64, f64) {
        self.series
            .iter()
            .flat_map(|series| series.values.iter().flatten())
            .filter(|value| value.is_finite())
            .fold((0.0f64, 0.0f64), |(lo, hi), value| (lo.min(*value), hi.max(*value)))
    }
}
