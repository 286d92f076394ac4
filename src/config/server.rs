//! HTTP server configuration.
//!
//! Settings come from an optional `config.toml` with a `[server]` table. Every field has a
//! default, and `SERVER_PORT` in the environment overrides the configured port.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings for the HTTP listener and router
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Prefix all API routes are nested under, e.g. `/api`
    pub api_prefix: String,
    /// Origins allowed by the CORS layer; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_prefix: "/api".to_string(),
            cors_origins: vec!["http://localhost:8000".to_string()],
        }
    }
}

impl ServerConfig {
    /// Replaces the port with `SERVER_PORT` when it is set.
    ///
    /// # Errors
    /// Returns an error if `SERVER_PORT` is set but is not a valid port number.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.port = parse_port(&port)?;
        }
        Ok(self)
    }

    /// The `host:port` string to bind the listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(value: &str) -> Result<u16> {
    value.trim().parse().map_err(|e| Error::Config {
        message: format!("Invalid SERVER_PORT '{value}': {e}"),
    })
}

/// Loads the configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the server configuration from `SALES_LEDGER_CONFIG` (default `./config.toml`),
/// falling back to the defaults when the file does not exist, then applies environment
/// overrides.
pub fn load_server_config() -> Result<ServerConfig> {
    let path = std::env::var("SALES_LEDGER_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

    let config = if Path::new(&path).exists() {
        tracing::debug!("Loading configuration from {}", path);
        load_config(&path)?
    } else {
        tracing::info!("No configuration file at {}, using defaults.", path);
        Config::default()
    };

    config.server.with_env_overrides()
}
