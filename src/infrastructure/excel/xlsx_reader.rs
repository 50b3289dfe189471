use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// Read the first worksheet of an in-memory XLSX workbook
pub fn read_first_sheet(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

    range_to_table(&range)
}

/// First row is the header, the remaining rows are data
fn range_to_table(range: &Range<Data>) -> Result<Table> {
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| AppError::ParseError("No columns to parse from file".to_string()))?
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();

    let data = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Table::from_raw_rows(headers, data)
}

/// Raw text of a cell, `None` for empty and error cells
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(match dt.as_datetime() {
            Some(value) if value.time() == chrono::NaiveTime::MIN => {
                value.format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        }),
    }
}
