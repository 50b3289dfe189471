use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::workflow::WorkflowSettings;

pub const CONFIG_FILE: &str = "data_sweeper.toml";
pub const ENV_PREFIX: &str = "DATA_SWEEPER_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a JSON request body (uploads travel base64-encoded)
    pub max_payload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            max_payload_bytes: 64 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
    /// Entries kept for `GET /api/logs`
    pub buffer_size: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            buffer_size: 100,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub workflow: WorkflowSettings,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::ConfigError("server.port must be > 0".to_string()));
        }
        if self.server.max_payload_bytes == 0 {
            return Err(AppError::ConfigError(
                "server.max_payload_bytes must be > 0".to_string(),
            ));
        }
        if self.log.buffer_size == 0 {
            return Err(AppError::ConfigError("log.buffer_size must be > 0".to_string()));
        }
        self.workflow
            .validate()
            .map_err(|e| AppError::ConfigError(format!("workflow: {}", e)))
    }
}

/// Layered configuration: defaults, then `data_sweeper.toml`, then
/// `DATA_SWEEPER_*` environment variables (`__` separates sections).
pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new() -> Self {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self { figment }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self.figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigService::new().load().expect("defaults load");
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.server.port, 3001);
            assert_eq!(config.workflow.preview_rows, 5);
            assert_eq!(config.log.buffer_size, 100);
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [server]
                port = 8080

                [workflow]
                preview_rows = 10
                "#,
            )?;
            jail.set_env("DATA_SWEEPER_SERVER__PORT", "9090");
            jail.set_env("DATA_SWEEPER_LOG__FILTER", "debug");

            let config = ConfigService::new().load().expect("layered load");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.workflow.preview_rows, 10);
            assert_eq!(config.workflow.chart_width, 800);
            assert_eq!(config.log.filter, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("DATA_SWEEPER_WORKFLOW__CHART_WIDTH", "0");
            let err = ConfigService::new().load().unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }
}
