// ============================================================
// FILE WORKFLOW DOMAIN
// ============================================================
// Value objects passed between the pipeline stages

mod chart;
mod export;
mod options;
mod settings;
mod upload;

pub use chart::{ChartData, ChartSeries, MAX_CHART_SERIES};
pub use export::{ExportArtifact, ExportFormat, CSV_MIME, XLSX_MIME};
pub use options::{CleanStep, FileOptions};
pub use settings::WorkflowSettings;
pub use upload::{SourceFormat, UploadedFile};
