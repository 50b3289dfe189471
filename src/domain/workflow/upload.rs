use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// A file as handed over by the UI layer
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Lowercased extension including the dot (`.csv`), empty when absent
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default()
    }

    pub fn source_format(&self) -> Result<SourceFormat> {
        SourceFormat::from_extension(&self.extension())
    }
}

/// Container formats accepted on upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Xlsx,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext {
            ".csv" => Ok(SourceFormat::Csv),
            ".xlsx" => Ok(SourceFormat::Xlsx),
            other => Err(AppError::UnsupportedFormat(other.to_string())),
        }
    }
}
