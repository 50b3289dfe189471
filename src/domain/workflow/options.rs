use serde::{Deserialize, Serialize};

use super::ExportFormat;

/// One cleaning action, applied in the order the user requested them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanStep {
    RemoveDuplicates,
    FillMissing,
}

/// Per-file selections held by the UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOptions {
    /// "Clean data" checkbox; steps are ignored while it is off
    pub clean_data: bool,

    pub clean_steps: Vec<CleanStep>,

    /// Columns to keep, in order. `None` keeps every column.
    pub columns: Option<Vec<String>>,

    /// "Show visualization" checkbox
    pub show_chart: bool,

    pub convert_to: Option<ExportFormat>,
}

impl FileOptions {
    pub fn active_clean_steps(&self) -> &[CleanStep] {
        if self.clean_data {
            &self.clean_steps
        } else {
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let options: FileOptions = serde_json::from_str("{}").unwrap();
        assert!(!options.clean_data);
        assert!(options.columns.is_none());
        assert!(options.convert_to.is_none());
    }

    #[test]
    fn test_steps_require_clean_flag() {
        let mut options: FileOptions =
            serde_json::from_str(r#"{"clean_steps":["remove_duplicates","fill_missing"]}"#).unwrap();
        assert!(options.active_clean_steps().is_empty());
        options.clean_data = true;
        assert_eq!(
            options.active_clean_steps(),
            &[CleanStep::RemoveDuplicates, CleanStep::FillMissing]
        );
    }
}
