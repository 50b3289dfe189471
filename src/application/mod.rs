pub mod use_cases;

pub use use_cases::file_workflow::{FileReport, FileWorkflow, RenderedChart};
