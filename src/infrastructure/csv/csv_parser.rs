// ============================================================
// CSV PARSER
// ============================================================
// Parse uploaded CSV bytes into a typed table

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// Comma-separated parser with encoding fallback; values are kept untrimmed
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw uploaded bytes
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let content = Self::decode(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::None)
            .flexible(true) // short rows are padded, long rows rejected below
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        if headers.is_empty() {
            return Err(AppError::ParseError(
                "No columns to parse from file".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(index, &headers, &record)?);
        }

        Table::from_raw_rows(headers.iter().map(str::to_string).collect(), rows)
    }

    /// UTF-8 (BOM stripped) first, Windows-1252 when the bytes are not UTF-8
    fn decode(bytes: &[u8]) -> String {
        let (content, had_errors) = UTF_8.decode_with_bom_removal(bytes);
        if !had_errors {
            return content.into_owned();
        }

        let (content, _, _) = WINDOWS_1252.decode(bytes);
        content.into_owned()
    }

    /// Parse a single CSV record into raw cells
    fn parse_row(
        index: usize,
        headers: &StringRecord,
        record: &StringRecord,
    ) -> Result<Vec<Option<String>>> {
        if record.len() > headers.len() {
            let line = record
                .position()
                .map(|pos| pos.line())
                .unwrap_or(index as u64 + 2);
            return Err(AppError::ParseError(format!(
                "Expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            )));
        }

        Ok(record.iter().map(|value| Some(value.to_string())).collect())
    }
}
