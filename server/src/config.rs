//! Configuration management for the festival server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unparseable values fall back to their default with a warning. An unknown
//! storage backend, or the `postgres` backend without `DATABASE_URL`, is an error.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors that prevent startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `STORAGE_BACKEND` named an unsupported backend.
    #[error("Unknown storage backend '{0}'. Expected 'memory' or 'postgres'")]
    UnknownBackend(String),

    /// The `postgres` backend was selected without a connection URL.
    #[error("STORAGE_BACKEND=postgres requires DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Storage configuration
    pub storage: StorageConfig,
    /// Admin and CORS configuration
    pub access: AccessConfig,
    /// Prometheus exporter configuration
    pub metrics: MetricsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    /// `host:port` to bind the listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Graceful shutdown timeout.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

/// Where events and registrations are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory; lost on restart
    Memory,
    /// `PostgreSQL` via `DATABASE_URL`
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// Storage configuration
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Selected backend
    pub backend: StorageBackend,
    /// `PostgreSQL` connection URL
    pub database_url: Option<String>,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
    /// Load the built-in catalog into an empty store at startup
    pub seed_events: bool,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("backend", &self.backend)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("seed_events", &self.seed_events)
            .finish()
    }
}

/// Admin and CORS configuration
#[derive(Clone, PartialEq, Eq)]
pub struct AccessConfig {
    /// Bearer token for admin endpoints; unset disables them
    pub admin_token: Option<String>,
    /// Allowed CORS origin; unset allows any origin
    pub cors_allowed_origin: Option<String>,
}

impl fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessConfig")
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish()
    }
}

/// Prometheus exporter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Start the exporter
    pub enabled: bool,
    /// Exporter host
    pub host: String,
    /// Exporter port
    pub port: u16,
}

impl MetricsConfig {
    /// `host:port` for the exporter listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnknownBackend`] for an unsupported `STORAGE_BACKEND`
    /// - [`ConfigError::MissingDatabaseUrl`] for `postgres` without `DATABASE_URL`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Memory,
        };
        let database_url = var("DATABASE_URL");
        if backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        Ok(Self {
            server: ServerConfig {
                host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&var, "PORT", 5000),
                shutdown_timeout: parse_or(&var, "SHUTDOWN_TIMEOUT", 30),
            },
            storage: StorageConfig {
                backend,
                database_url,
                max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", 10),
                connect_timeout: parse_or(&var, "DATABASE_CONNECT_TIMEOUT", 30),
                seed_events: flag_or(&var, "SEED_EVENTS", true),
            },
            access: AccessConfig {
                admin_token: var("ADMIN_TOKEN"),
                cors_allowed_origin: var("CORS_ALLOWED_ORIGIN"),
            },
            metrics: MetricsConfig {
                enabled: flag_or(&var, "METRICS_ENABLED", false),
                host: var("METRICS_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&var, "METRICS_PORT", 9090),
            },
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "Invalid configuration value, using default");
            default
        }),
        None => default,
    }
}

fn flag_or<F>(var: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = var(key) else {
        return default;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, default, "Invalid boolean configuration value, using default");
            default
        }
    }
}
