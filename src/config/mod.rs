/// Database configuration and connection management
pub mod database;

/// HTTP server configuration loading from config.toml and the environment
pub mod server;
