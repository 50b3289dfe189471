use std::io;
use std::sync::{Arc, Mutex};

use tracing::{error, info};

use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::{add_log, start_server, LogEntry};

pub async fn run() -> io::Result<()> {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = ConfigService::new().load().map_err(|err| {
        eprintln!("{}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.log.filter.as_str())
        .try_init();

    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));
    add_log(
        &logs,
        config.log.buffer_size,
        "INFO",
        "Server",
        &format!(
            "Listening on http://{}:{}",
            config.server.host, config.server.port
        ),
    );

    let server = start_server(&config, logs).map_err(|err| {
        error!(
            error = %err,
            host = %config.server.host,
            port = config.server.port,
            "Failed to bind HTTP server"
        );
        err
    })?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Data Sweeper started"
    );
    server.await
}
