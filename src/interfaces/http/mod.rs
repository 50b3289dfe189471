use actix_cors::Cors;
use actix_web::http::header::ContentDisposition;
use actix_web::http::StatusCode;
use actix_web::{
    dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder, ResponseError,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::application::{FileReport, FileWorkflow};
use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, ColumnType};
use crate::domain::workflow::{ChartData, ExportFormat, FileOptions, UploadedFile};
use crate::infrastructure::config::AppConfig;

const INDEX_HTML: &str = include_str!("static/index.html");

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub workflow: FileWorkflow,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    pub log_capacity: usize,
}

impl HttpState {
    fn log(&self, level: &str, source: &str, message: &str) {
        add_log(&self.logs, self.log_capacity, level, source, message);
    }
}

/// One uploaded file as sent by the browser
#[derive(Debug, Deserialize)]
pub struct FilePayload {
    pub name: String,
    pub content_base64: String,
    #[serde(default)]
    pub options: FileOptions,
}

impl FilePayload {
    fn decode(&self) -> Result<UploadedFile> {
        let content = BASE64.decode(self.content_base64.as_bytes()).map_err(|e| {
            AppError::ValidationError(format!("Invalid base64 content for {}: {}", self.name, e))
        })?;
        Ok(UploadedFile::new(self.name.clone(), content))
    }
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub files: Vec<FilePayload>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub file: FilePayload,
    pub format: ExportFormat,
}

#[derive(Debug, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnType,
}

#[derive(Debug, Serialize)]
pub struct DownloadPayload {
    pub file_name: String,
    pub mime_type: String,
    pub content_base64: String,
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub file_name: String,
    pub available_columns: Vec<String>,
    pub columns: Vec<ColumnSummary>,
    pub row_count: usize,
    pub preview: Vec<Vec<CellValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_svg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<DownloadPayload>,
}

impl FileSummary {
    fn from_report(report: FileReport, preview_rows: usize) -> Self {
        let (chart, chart_svg) = match report.chart {
            Some(rendered) => (Some(rendered.data), Some(rendered.svg)),
            None => (None, None),
        };

        Self {
            file_name: report.file_name,
            available_columns: report.available_columns,
            columns: report
                .table
                .columns()
                .iter()
                .map(|c| ColumnSummary {
                    name: c.name().to_string(),
                    kind: c.kind(),
                })
                .collect(),
            row_count: report.table.row_count(),
            preview: report.table.head(preview_rows),
            chart,
            chart_svg,
            download: report.export.map(|artifact| DownloadPayload {
                file_name: artifact.file_name,
                mime_type: artifact.mime_type.to_string(),
                content_base64: BASE64.encode(&artifact.bytes),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileResult {
    Ok(FileSummary),
    Error { file_name: String, error: String },
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub message: String,
    pub results: Vec<FileResult>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::ParseError(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Run the pipeline for every file; one file failing never fails the others
fn process_files(workflow: &FileWorkflow, files: Vec<FilePayload>) -> Vec<FileResult> {
    let preview_rows = workflow.settings().preview_rows;

    files
        .into_iter()
        .map(|payload| {
            let outcome = payload
                .decode()
                .and_then(|upload| workflow.run(&upload, &payload.options));
            match outcome {
                Ok(report) => FileResult::Ok(FileSummary::from_report(report, preview_rows)),
                Err(e) => {
                    tracing::warn!(file = %payload.name, error = %e, "File skipped");
                    FileResult::Error {
                        file_name: payload.name,
                        error: e.to_string(),
                    }
                }
            }
        })
        .collect()
}

#[post("/process")]
async fn process(data: web::Data<HttpState>, req: web::Json<ProcessRequest>) -> impl Responder {
    let files = req.into_inner().files;
    let total = files.len();
    data.log("INFO", "Workflow", &format!("Processing {} file(s)", total));

    let workflow = data.workflow.clone();
    let results = match web::block(move || process_files(&workflow, files)).await {
        Ok(results) => results,
        Err(e) => {
            data.log("ERROR", "Workflow", &format!("Processing failed: {}", e));
            return HttpResponse::InternalServerError().body(e.to_string());
        }
    };

    for result in &results {
        if let FileResult::Error { file_name, error } = result {
            data.log("ERROR", "Workflow", &format!("{}: {}", file_name, error));
        }
    }

    let succeeded = results
        .iter()
        .filter(|r| matches!(r, FileResult::Ok(_)))
        .count();
    let message = if succeeded == total {
        "All files processed successfully!".to_string()
    } else {
        format!("Processed {} of {} files", succeeded, total)
    };

    HttpResponse::Ok().json(ProcessResponse { message, results })
}

#[post("/convert")]
async fn convert(
    data: web::Data<HttpState>,
    req: web::Json<ConvertRequest>,
) -> std::result::Result<HttpResponse, AppError> {
    let ConvertRequest { file, format } = req.into_inner();
    data.log(
        "INFO",
        "Convert",
        &format!("Converting {} to {}", file.name, format),
    );

    let upload = file.decode()?;
    let options = FileOptions {
        show_chart: false,
        convert_to: Some(format),
        ..file.options
    };

    let workflow = data.workflow.clone();
    let report = web::block(move || workflow.run(&upload, &options))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| {
            data.log("ERROR", "Convert", &format!("{}: {}", file.name, e));
            e
        })?;

    let artifact = report
        .export
        .ok_or_else(|| AppError::Internal("Conversion produced no output".to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type(artifact.mime_type)
        .insert_header(ContentDisposition::attachment(artifact.file_name))
        .body(artifact.bytes))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log(
    logs: &Mutex<Vec<LogEntry>>,
    capacity: usize,
    level: &str,
    source: &str,
    message: &str,
) {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };

    let mut logs = logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    logs.push(entry);
    if logs.len() > capacity {
        let overflow = logs.len() - capacity;
        logs.drain(..overflow);
    }
}

/// Routes shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(
        web::scope("/api")
            .service(process)
            .service(convert)
            .service(get_logs),
    );
}

pub fn start_server(config: &AppConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState {
        workflow: FileWorkflow::new(config.workflow.clone()),
        logs,
        log_capacity: config.log.buffer_size,
    });
    let json_limit = config.server.max_payload_bytes;

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool
        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .configure(configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run();

    Ok(server)
}
