//! Service configuration: structs, parsing, and validation.
//!
//! Split across sub-modules:
//! - `common`: shared helpers and `ConfigError`
//! - `sms`, `auth`: section-specific configs

mod auth;
mod common;
mod sms;

pub use auth::{ApiKeyConfig, AuthConfig};
pub use common::ConfigError;
pub use sms::{SmsConfig, SmsProvider};

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HTTP_PORT, DEFAULT_STORE_PATH};
use common::{default_true, warn_if_world_readable};

// ── Top-level config ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default)]
    pub service: ServiceInfo,

    pub sms: SmsConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceInfo {
    #[serde(default = "default_service_name")]
    pub name: String,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_service_name() -> String {
    "alertdispatch".to_string()
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_http_port")]
    pub port: u16,

    /// Require authentication on `/metrics` as well as the API routes.
    #[serde(default)]
    pub metrics_auth_required: bool,

    /// Serve the OpenAPI document at `/api-docs/openapi.json`.
    #[serde(default = "default_true")]
    pub openapi: bool,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_http_port(),
            metrics_auth_required: false,
            openapi: true,
        }
    }
}

// ── Log level / format ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Flattened JSON, log-aggregator compatible.
    #[default]
    Json,
    /// Human-readable colored output for development.
    Text,
}

// ── Loading & validation ───────────────────────────────────────────

impl ServiceConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        warn_if_world_readable(path);
        let config: Self = serde_yaml_ng::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sms.validate()?;
        self.auth.validate()?;
        if self.store.path.is_empty() {
            return Err(ConfigError::Validation {
                field: "store.path".to_string(),
                message: "store path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn minimal_yaml() -> &'static str {
        r#"
sms:
  provider: log
  from_number: "+15550000"
auth:
  api_keys:
    - name: ops
      key: test-key-1234
"#
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn minimal_config_loads_with_defaults() {
        let file = write_config(minimal_yaml());
        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.service.name, "alertdispatch");
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.http.bind_address, "127.0.0.1");
        assert_eq!(config.store.path, DEFAULT_STORE_PATH);
        assert_eq!(config.service.log_level, LogLevel::Info);
        assert_eq!(config.service.log_format, LogFormat::Json);
        assert!(config.http.openapi);
    }

    #[test]
    fn unknown_top_level_field_rejected() {
        let file = write_config(&format!("{}\nspeech_recognition: true\n", minimal_yaml()));
        assert!(matches!(
            ServiceConfig::load(file.path()),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn empty_store_path_rejected() {
        let yaml = format!("{}\nstore:\n  path: \"\"\n", minimal_yaml());
        let file = write_config(&yaml);
        let err = ServiceConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("store.path"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ServiceConfig::load(Path::new("/no/such/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn log_level_parses_lowercase() {
        let info: LogLevel = serde_yaml_ng::from_str("debug").unwrap();
        assert_eq!(info, LogLevel::Debug);
        assert_eq!(info.as_str(), "debug");
    }
}
