//! HTTP listener, logging and static frontend settings

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Where and how the HTTP front door listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `0.0.0.0` or `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (`PORT`)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment; production switches logs to JSON
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound on handling a single request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// CORS allowed origins (comma-separated). Unset means any origin.
    pub cors_origins: Option<String>,

    /// Directory holding the checkout frontend
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

/// Deployment environment.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    /// Listener address built from `host` and `port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ValidationError::InvalidSocketAddress(raw))
    }

    /// JSON logs are emitted in production.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Per-request timeout applied by the HTTP layer
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Allowed CORS origins; empty means any origin.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.port, self.request_timeout_secs) {
            (0, _) => Err(ValidationError::InvalidPort),
            (_, 0) | (_, 301..) => Err(ValidationError::InvalidTimeout),
            _ => self.socket_addr().map(|_| ()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4242
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,payment_backend=debug,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}
