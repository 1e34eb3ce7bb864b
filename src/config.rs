//! Server configuration.
//!
//! Configuration is read from a YAML file. Every field has a default, so an
//! empty file (or no file at all) yields a working server on port 8080.
//!
//! ```yaml
//! server:
//!   port: 9090
//!   workers: 8
//! static_files:
//!   root: public
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "KEEL_CONFIG";
/// Configuration file used when `KEEL_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "keel.yaml";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_BACKLOG: u32 = 100;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 5;
/// 10 MiB
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 10_485_760;
pub const DEFAULT_READ_BUFFER_SIZE: usize = 30_000;
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

/// Listener, worker pool and per-connection limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of worker tasks serving connections.
    pub workers: usize,
    /// Listen backlog handed to the OS.
    pub backlog: u32,
    /// Idle timeout applied to every socket read.
    pub read_timeout_secs: u64,
    /// Largest `Content-Length` accepted before answering 413.
    pub max_payload_size: usize,
    /// Size of the initial read holding the request line and headers.
    pub read_buffer_size: usize,
    /// Size of each follow-up read while collecting a body.
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory files are served from.
    pub root: PathBuf,
    /// URL prefix that also refers to the asset root (`/public/style.css`).
    pub url_prefix: String,
}

/// Per-connection limits derived from [`ServerConfig`].
#[derive(Debug, Clone)]
pub struct Limits {
    pub max_payload_size: usize,
    pub read_timeout: Duration,
    pub read_buffer_size: usize,
    pub chunk_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            backlog: DEFAULT_BACKLOG,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            url_prefix: "public".to_string(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        ServerConfig::default().limits()
    }
}

impl ServerConfig {
    /// `host:port` string used for binding.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_payload_size: self.max_payload_size,
            read_timeout: self.read_timeout(),
            read_buffer_size: self.read_buffer_size,
            chunk_size: self.chunk_size,
        }
    }
}

impl Config {
    /// Loads the file named by `KEEL_CONFIG`, or `keel.yaml`.
    ///
    /// A missing file is not an error: defaults are used instead.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let path = Path::new(&path);

        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }

        let cfg = Self::from_file(path)?;
        tracing::info!(
            path = %path.display(),
            port = cfg.server.port,
            workers = cfg.server.workers,
            "Loaded config"
        );
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as "all defaults".
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(raw).context("failed to parse YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let server = &self.server;
        anyhow::ensure!(server.workers > 0, "server.workers must be at least 1");
        anyhow::ensure!(server.read_buffer_size > 0, "server.read_buffer_size must be positive");
        anyhow::ensure!(server.chunk_size > 0, "server.chunk_size must be positive");
        anyhow::ensure!(server.read_timeout_secs > 0, "server.read_timeout_secs must be positive");
        Ok(())
    }
}
