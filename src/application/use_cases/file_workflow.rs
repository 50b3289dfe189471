// ============================================================
// FILE WORKFLOW USE CASE
// ============================================================
// ingest -> clean -> project -> visualize -> export, one file at a time.
// Every stage takes a table and returns a new one; a failing stage
// leaves the caller's previous table untouched.

use std::time::Instant;

use tracing::{debug, info};

use crate::domain::error::Result;
use crate::domain::table::Table;
use crate::domain::workflow::{
    ChartData, CleanStep, ExportArtifact, ExportFormat, FileOptions, SourceFormat, UploadedFile,
    WorkflowSettings,
};
use crate::infrastructure::chart::render_bar_chart_svg;
use crate::infrastructure::csv::{CsvParser, CsvWriter};
use crate::infrastructure::excel::{read_first_sheet, write_workbook};

/// Rendered chart: data for the UI plus a ready-made SVG
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub data: ChartData,
    pub svg: String,
}

/// Outcome of running every requested stage on one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file_name: String,
    /// Columns offered for selection (after cleaning, before projection)
    pub available_columns: Vec<String>,
    pub table: Table,
    pub chart: Option<RenderedChart>,
    pub export: Option<ExportArtifact>,
}

#[derive(Debug, Clone, Default)]
pub struct FileWorkflow {
    settings: WorkflowSettings,
}

impl FileWorkflow {
    pub fn new(settings: WorkflowSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Parse uploaded bytes, dispatching on the lowercased extension
    pub fn ingest(&self, file: &UploadedFile) -> Result<Table> {
        let table = match file.source_format()? {
            SourceFormat::Csv => CsvParser::new().parse_bytes(&file.content)?,
            SourceFormat::Xlsx => read_first_sheet(&file.content)?,
        };

        info!(
            file = %file.name,
            rows = table.row_count(),
            columns = table.column_count(),
            "Ingested file"
        );
        Ok(table)
    }

    /// Apply cleaning steps in order
    pub fn clean(&self, table: Table, steps: &[CleanStep]) -> Table {
        steps.iter().fold(table, |table, step| {
            let before = table.row_count();
            let cleaned = match step {
                CleanStep::RemoveDuplicates => table.drop_duplicates(),
                CleanStep::FillMissing => table.fill_missing_with_mean(),
            };
            debug!(step = ?step, rows_before = before, rows_after = cleaned.row_count(), "Applied clean step");
            cleaned
        })
    }

    /// Keep only `columns`, in the given order
    pub fn project(&self, table: &Table, columns: &[String]) -> Result<Table> {
        table.select_columns(columns)
    }

    /// Bar chart of the first two numeric columns
    pub fn visualize(&self, table: &Table) -> Result<RenderedChart> {
        let data = ChartData::from_table(table);
        let svg = render_bar_chart_svg(&data, self.settings.chart_width, self.settings.chart_height)?;
        Ok(RenderedChart { data, svg })
    }

    /// Serialize `table` for download under a name derived from `source_name`
    pub fn export(&self, table: &Table, source_name: &str, format: ExportFormat) -> Result<ExportArtifact> {
        let bytes = match format {
            ExportFormat::Csv => CsvWriter::new().write(table)?,
            ExportFormat::Excel => write_workbook(table)?,
        };

        let artifact = ExportArtifact {
            file_name: format.file_name_for(source_name),
            mime_type: format.mime_type(),
            bytes,
        };

        info!(
            file = %source_name,
            output = %artifact.file_name,
            format = %format,
            bytes = artifact.bytes.len(),
            "Exported file"
        );
        Ok(artifact)
    }

    /// Run the whole pipeline for one file according to `options`
    pub fn run(&self, file: &UploadedFile, options: &FileOptions) -> Result<FileReport> {
        let start = Instant::now();

        let table = self.ingest(file)?;
        let table = self.clean(table, options.active_clean_steps());
        let available_columns = table.column_names();

        let table = match &options.columns {
            Some(columns) => self.project(&table, columns)?,
            None => table,
        };

        let chart = if options.show_chart {
            Some(self.visualize(&table)?)
        } else {
            None
        };

        let export = options
            .convert_to
            .map(|format| self.export(&table, &file.name, format))
            .transpose()?;

        debug!(
            file = %file.name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Workflow finished"
        );

        Ok(FileReport {
            file_name: file.name.clone(),
            available_columns,
            table,
            chart,
            export,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::table::CellValue;
    use crate::domain::workflow::XLSX_MIME;

    fn csv_file(name: &str, content: &str) -> UploadedFile {
        UploadedFile::new(name, content.as_bytes().to_vec())
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_dedup_scenario() {
        let workflow = FileWorkflow::default();
        let file = csv_file("data.csv", "k,v\na,1\na,1\nb,2\n");
        let options = FileOptions {
            clean_data: true,
            clean_steps: vec![CleanStep::RemoveDuplicates],
            ..Default::default()
        };

        let report = workflow.run(&file, &options).unwrap();
        assert_eq!(report.table.row_count(), 2);
        assert_eq!(
            report.table.row(0),
            Some(vec![&CellValue::Text("a".into()), &CellValue::Number(1.0)])
        );
        assert_eq!(
            report.table.row(1),
            Some(vec![&CellValue::Text("b".into()), &CellValue::Number(2.0)])
        );
    }

    #[test]
    fn test_fill_missing_xlsx_scenario() {
        let workflow = FileWorkflow::default();
        let source = CsvParser::new()
            .parse_content("item,units\npens,4\npaper,\nink,8\n")
            .unwrap();
        let file = UploadedFile::new("sales.xlsx", write_workbook(&source).unwrap());
        let options = FileOptions {
            clean_data: true,
            clean_steps: vec![CleanStep::FillMissing],
            ..Default::default()
        };

        let report = workflow.run(&file, &options).unwrap();
        assert_eq!(
            report.table.column("units").unwrap().cells(),
            &[CellValue::Number(4.0), CellValue::Number(6.0), CellValue::Number(8.0)]
        );
    }

    #[test]
    fn test_convert_csv_to_excel_scenario() {
        let workflow = FileWorkflow::default();
        let file = csv_file("report.csv", "a,b\n1,x\n");
        let options = FileOptions {
            convert_to: Some(ExportFormat::Excel),
            ..Default::default()
        };

        let export = workflow.run(&file, &options).unwrap().export.unwrap();
        assert_eq!(export.file_name, "report.xlsx");
        assert_eq!(export.mime_type, XLSX_MIME);
        assert_eq!(read_first_sheet(&export.bytes).unwrap().column_names(), columns(&["a", "b"]));
    }

    #[test]
    fn test_unsupported_format_scenario() {
        let workflow = FileWorkflow::default();
        let file = csv_file("notes.txt", "a,b\n1,2\n");
        let err = workflow.run(&file, &FileOptions::default()).unwrap_err();
        assert_eq!(err, AppError::UnsupportedFormat(".txt".to_string()));
    }

    #[test]
    fn test_clean_steps_ignored_without_clean_flag() {
        let workflow = FileWorkflow::default();
        let file = csv_file("data.csv", "k\na\na\n");
        let options = FileOptions {
            clean_steps: vec![CleanStep::RemoveDuplicates],
            ..Default::default()
        };
        assert_eq!(workflow.run(&file, &options).unwrap().table.row_count(), 2);
    }

    #[test]
    fn test_projection_precedes_chart_and_export() {
        let workflow = FileWorkflow::default();
        let file = csv_file("m.csv", "a,b,c\n1,2,3\n4,5,6\n");
        let options = FileOptions {
            columns: Some(columns(&["c", "a"])),
            show_chart: true,
            convert_to: Some(ExportFormat::Csv),
            ..Default::default()
        };

        let report = workflow.run(&file, &options).unwrap();
        assert_eq!(report.available_columns, columns(&["a", "b", "c"]));
        assert_eq!(report.table.column_names(), columns(&["c", "a"]));

        let chart = report.chart.unwrap();
        let names: Vec<_> = chart.data.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);

        let export = report.export.unwrap();
        assert_eq!(export.file_name, "m.csv");
        assert_eq!(String::from_utf8(export.bytes).unwrap(), "c,a\n3,1\n6,4\n");
    }

    #[test]
    fn test_export_round_trip_through_ingest() {
        let workflow = FileWorkflow::default();
        let table = workflow
            .ingest(&csv_file("t.csv", "name,score\nann,1.5\nbob,\n"))
            .unwrap();
        let artifact = workflow.export(&table, "t.csv", ExportFormat::Csv).unwrap();
        let reingested = workflow
            .ingest(&UploadedFile::new(artifact.file_name.clone(), artifact.bytes))
            .unwrap();
        assert_eq!(reingested, table);
    }

    #[test]
    fn test_failed_projection_reports_validation_error() {
        let workflow = FileWorkflow::default();
        let table = workflow.ingest(&csv_file("t.csv", "a\n1\n")).unwrap();
        let err = workflow.project(&table, &columns(&["missing"])).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(table.column_names(), columns(&["a"]));
    }
}
