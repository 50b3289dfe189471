use serde::{Deserialize, Serialize};

/// Tunables of the file pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSettings {
    /// Rows included in a table preview (default: 5)
    pub preview_rows: usize,

    /// Rendered chart width in pixels (default: 800)
    pub chart_width: u32,

    /// Rendered chart height in pixels (default: 400)
    pub chart_height: u32,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            chart_width: 800,
            chart_height: 400,
        }
    }
}

impl WorkflowSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err("chart_width and chart_height must be > 0".to_string());
        }
        Ok(())
    }
}
