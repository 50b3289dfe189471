use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Target format of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[serde(alias = "CSV")]
    Csv,
    #[serde(alias = "Excel", alias = "xlsx")]
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => ".csv",
            ExportFormat::Excel => ".xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MIME,
            ExportFormat::Excel => XLSX_MIME,
        }
    }

    /// Upload name with its extension swapped for this format's
    pub fn file_name_for(&self, source_name: &str) -> String {
        let stem = Path::new(source_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(source_name);
        format!("{}{}", stem, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Excel => write!(f, "Excel"),
        }
    }
}

/// Serialized table ready to be handed to the download mechanism
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}
