// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Typed in-memory table and the pure transforms applied to it
// No I/O, no async

mod cell;
mod column;
pub mod inference;
#[allow(clippy::module_inception)]
mod table;

pub use cell::{format_number, CellValue};
pub(crate) use cell::CellKey;
pub use column::{Column, ColumnType};
pub use table::Table;
