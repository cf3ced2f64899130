//! Server configuration via TOML files.
//!
//! The `[server]` table configures the HTTP boundary; the `[analysis]` table
//! of the same file is handed to [`AnalysisConfig`].

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use matriz_core::{AnalysisConfig, ConfigError};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/matriz.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "MATRIZ_CONFIG";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Socket address the listener binds to
    pub bind_address: SocketAddr,
    /// Color catalog precomputed into the similarity table at startup
    pub catalog_path: PathBuf,
    /// Log every request line and response status
    pub log_requests: bool,
    /// Directory receiving the JSON-lines journal
    pub journal_dir: PathBuf,
    pub journal_enabled: bool,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
    pub analysis: AnalysisConfig,
}

impl ServerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_str(&contents)
    }

    /// Parse both tables; missing tables or keys yield defaults.
    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfigFile =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let analysis = AnalysisConfig::from_str(toml_str)?;
        Self::try_from(raw.server, analysis)
    }

    fn try_from(raw: RawServerConfig, analysis: AnalysisConfig) -> Result<Self, ConfigError> {
        let bind_address = raw.bind_address.parse::<SocketAddr>().map_err(|err| {
            ConfigError::Parse(format!(
                "server.bind_address '{}' is not a socket address: {}",
                raw.bind_address, err
            ))
        })?;
        if raw.catalog_path.trim().is_empty() {
            return Err(ConfigError::Parse(
                "server.catalog_path must not be empty".into(),
            ));
        }
        if raw.max_upload_bytes == 0 {
            return Err(ConfigError::Parse(
                "server.max_upload_bytes must be ≥ 1".into(),
            ));
        }

        Ok(Self {
            bind_address,
            catalog_path: PathBuf::from(raw.catalog_path),
            log_requests: raw.log_requests,
            journal_dir: PathBuf::from(raw.journal_dir),
            journal_enabled: raw.journal_enabled,
            max_upload_bytes: raw.max_upload_bytes,
            analysis,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            catalog_path: PathBuf::from(default_catalog_path()),
            log_requests: true,
            journal_dir: PathBuf::from(default_journal_dir()),
            journal_enabled: true,
            max_upload_bytes: default_max_upload_bytes(),
            analysis: AnalysisConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfigFile {
    #[serde(default)]
    server: RawServerConfig,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    #[serde(default = "default_bind_address")]
    bind_address: String,
    #[serde(default = "default_catalog_path")]
    catalog_path: String,
    #[serde(default = "default_true")]
    log_requests: bool,
    #[serde(default = "default_journal_dir")]
    journal_dir: String,
    #[serde(default = "default_true")]
    journal_enabled: bool,
    #[serde(default = "default_max_upload_bytes")]
    max_upload_bytes: usize,
}

impl Default for RawServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            catalog_path: default_catalog_path(),
            log_requests: default_true(),
            journal_dir: default_journal_dir(),
            journal_enabled: default_true(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_catalog_path() -> String {
    "data/colors.csv".to_string()
}

fn default_journal_dir() -> String {
    "logs".to_string()
}

fn default_max_upload_bytes() -> usize {
    crate::routes::DEFAULT_MAX_UPLOAD_BYTES
}

fn default_true() -> bool {
    true
}
