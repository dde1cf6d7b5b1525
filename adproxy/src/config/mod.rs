//! Configuration management for adproxy
//!
//! Loaded from a TOML file (default: `adproxy.toml`). Every field has a
//! default, so an empty or missing file yields a working local setup.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Prefix the proxy routes are mounted under
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default)]
    pub cors: CorsConfig,
    /// Maximum request body size in bytes (default: 100MB)
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_bind_addr() -> String {
    "127.0.0.1:5602".to_string()
}

fn default_base_path() -> String {
    "/api/anomaly_detectors".to_string()
}

fn default_max_body_size() -> usize {
    100 * 1024 * 1024 // 100MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            base_path: default_base_path(),
            cors: CorsConfig::default(),
            max_body_size: default_max_body_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Enable CORS (default: true for development)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins. Use "*" for any origin, or list specific origins.
    #[serde(default = "default_cors_origins")]
    pub origins: Vec<String>,
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5601".to_string(),
        "http://127.0.0.1:5601".to_string(),
    ]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: default_cors_origins(),
        }
    }
}

/// Connection settings for the search cluster the routes forward to
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClusterConfig {
    /// Base URL of the cluster REST API
    #[serde(default = "default_cluster_url")]
    pub url: String,

    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Inbound request headers propagated to the cluster (case-insensitive)
    #[serde(default = "default_forwarded_headers")]
    pub forwarded_headers: Vec<String>,

    /// Basic auth used when the inbound request carries no `authorization` header
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_cluster_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    30000
}

fn default_forwarded_headers() -> Vec<String> {
    vec![
        "authorization".to_string(),
        "cookie".to_string(),
        "securitytenant".to_string(),
        "x-opaque-id".to_string(),
    ]
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            url: default_cluster_url(),
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
            forwarded_headers: default_forwarded_headers(),
            username: None,
            password: None,
        }
    }
}

impl ClusterConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LoggingConfig {
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log output format: "pretty" or "json"
    /// Override with LOG_FORMAT env var
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter string
    /// Override with RUST_LOG env var
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable Prometheus metrics at GET /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_level() -> String {
    "info,adproxy=debug,adproxy_routes=debug".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            log_level: default_log_level(),
            metrics_enabled: true,
        }
    }
}

/// Expand ~ to home directory in path
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;
        Ok(home.join(rest))
    } else if s == "~" {
        dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))
    } else {
        Ok(path.to_path_buf())
    }
}

impl Config {
    /// Load config from file path, or create default
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.expand_paths()?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            // Try to save default config
            if let Some(parent) = config_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = config.save(config_path);
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that would only fail later at request time
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.cluster.url)
            .map_err(|e| anyhow!("cluster.url {:?}: {}", self.cluster.url, e))?;
        if url.cannot_be_a_base() {
            return Err(anyhow!("cluster.url {:?} cannot be a base URL", self.cluster.url));
        }
        if !self.server.base_path.starts_with('/') {
            return Err(anyhow!(
                "server.base_path must start with '/', got {:?}",
                self.server.base_path
            ));
        }
        if self.cluster.username.is_some() != self.cluster.password.is_some() {
            return Err(anyhow!("cluster.username and cluster.password must be set together"));
        }
        Ok(())
    }

    /// Expand ~ in all paths
    fn expand_paths(&mut self) -> Result<()> {
        if let Some(ref f) = self.logging.file {
            self.logging.file = Some(expand_tilde(f)?);
        }
        Ok(())
    }
}
