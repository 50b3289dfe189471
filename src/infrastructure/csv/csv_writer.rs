// ============================================================
// CSV WRITER
// ============================================================
// Serialize a table to CSV bytes: header row, no index column

use csv::WriterBuilder;

use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `table`; a table without columns yields no bytes
    pub fn write(&self, table: &Table) -> Result<Vec<u8>> {
        if table.column_count() == 0 {
            return Ok(Vec::new());
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        writer.write_record(table.column_names())?;

        for row in 0..table.row_count() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|column| column.cells()[row].to_string())
                .collect();
            writer.write_record(&record)?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::ExportError(format!("Failed to flush CSV output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::CsvParser;

    #[test]
    fn test_write_header_and_rows() {
        let table = CsvParser::new()
            .parse_content("k,v\na,1\n\"b,c\",2.5\nd,\n")
            .unwrap();
        let bytes = CsvWriter::new().write(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "k,v\na,1\n\"b,c\",2.5\nd,\n"
        );
    }

    #[test]
    fn test_round_trip_preserves_names_and_values() {
        let original = CsvParser::new()
            .parse_content("id,score,label\n1,9.75,x\n2,,y\n3,7,\n")
            .unwrap();
        let bytes = CsvWriter::new().write(&original).unwrap();
        let reparsed = CsvParser::new().parse_bytes(&bytes).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_zero_columns_writes_nothing() {
        let table = CsvParser::new().parse_content("a\n1\n").unwrap();
        let empty = table.select_columns(&[]).unwrap();
        assert!(CsvWriter::new().write(&empty).unwrap().is_empty());
    }
}
