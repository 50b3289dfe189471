pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

mod app;

pub use app::run;
pub use application::{FileReport, FileWorkflow};
pub use domain::error::{AppError, Result};
pub use domain::table::{CellValue, Column, ColumnType, Table};
pub use domain::workflow::{
    ChartData, CleanStep, ExportArtifact, ExportFormat, FileOptions, UploadedFile,
};
