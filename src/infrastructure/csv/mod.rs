// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing with encoding fallback, and CSV serialization

mod csv_parser;
mod csv_writer;

pub use csv_parser::CsvParser;
pub use csv_writer::CsvWriter;
