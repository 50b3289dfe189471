// ============================================================
// EXCEL INFRASTRUCTURE LAYER
// ============================================================
// XLSX reading (calamine) and writing (zip + quick-xml)

mod xlsx_reader;
mod xlsx_writer;

pub use xlsx_reader::read_first_sheet;
pub use xlsx_writer::write_workbook;
