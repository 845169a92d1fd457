/// Configuration Module
///
/// Provides configuration management for the bookstore server.
/// Handles loading and parsing of the YAML configuration file and environment variables.
///
/// # Sources
/// Later sources override earlier ones:
/// 1. Built-in defaults
/// 2. `config/application.yml` (optional)
/// 3. Environment variables prefixed with `APP_`, nested keys separated by `__`
///    (e.g. `APP_BOOKSTORE__GRPC__SERVER__PORT=9000`)
///
/// # Copyright
/// Copyright (c) 2025 The bookstore-grpc authors
///
/// # License
/// Licensed under the Apache License, Version 2.0.

use std::path::Path;

use config::{Config as ConfigFile, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file, resolved relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/application.yml";

/// Application metadata configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Application {
    /// Name of the application
    pub name: String,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "bookstore_grpc=debug")
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address to bind
    pub endpoint: String,
    /// Port to bind
    pub port: u16,
}

impl ServerConfig {
    /// `endpoint:port` string suitable for `SocketAddr` parsing.
    pub fn address(&self) -> String {
        format!("{}:{}", self.endpoint, self.port)
    }
}

/// gRPC configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GrpcConfig {
    /// Server configuration
    pub server: ServerConfig,
}

/// A book to pre-populate
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedBook {
    pub author: String,
    pub title: String,
}

/// A shelf to pre-populate, with its books
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedShelf {
    pub theme: String,
    #[serde(default)]
    pub books: Vec<SeedBook>,
}

/// Bookstore configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookstoreConfig {
    /// gRPC configuration
    pub grpc: GrpcConfig,
    /// Initial store contents
    #[serde(default)]
    pub seed: Vec<SeedShelf>,
}

/// Application configuration settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Application metadata
    pub application: Application,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Bookstore configuration
    pub bookstore: BookstoreConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl Config {
    /// Loads configuration from [`DEFAULT_CONFIG_PATH`] and the environment.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the file exists but cannot be parsed, or if
    /// a value cannot be deserialized into its field type.
    ///
    /// # Examples
    /// ```no_run
    /// use bookstore_grpc::config::Config;
    ///
    /// let config = Config::new().expect("Failed to load configuration");
    /// println!("Listening on {}", config.bookstore.grpc.server.address());
    /// ```
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration from an explicit file path and the environment.
    /// A missing file falls back to the built-in defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigFile::builder()
            .set_default("application.name", "bookstore-grpc")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?
            .set_default("bookstore.grpc.server.endpoint", "0.0.0.0")?
            .set_default("bookstore.grpc.server.port", 8000)?
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build()?;
        config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Returns the bookstore configuration.
    pub fn bookstore(&self) -> &BookstoreConfig {
        &self.bookstore
    }
}
