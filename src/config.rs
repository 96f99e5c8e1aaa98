//! Runtime configuration read from the environment.
//!
//! Every setting has a default, so a missing variable only matters where the
//! setting is actually needed (the database URL when building a pool).

use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

use crate::todo::adapters::postgres::TodoPgPool;

/// Variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "CROSSLIST_DATABASE_URL";
/// Variable holding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "CROSSLIST_DB_POOL_SIZE";
/// Variable holding the connection timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "CROSSLIST_DB_CONNECT_TIMEOUT_SECS";
/// Variable holding the tracing filter directives.
pub const LOG_FILTER_VAR: &str = "CROSSLIST_LOG";
/// Variable selecting the log output format.
pub const LOG_FORMAT_VAR: &str = "CROSSLIST_LOG_FORMAT";

/// Errors raised while reading configuration or building resources from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No database URL was configured.
    #[error("{DATABASE_URL_VAR} is not set")]
    MissingDatabaseUrl,

    /// A numeric variable did not parse.
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value found.
        value: String,
    },

    /// The log format is not one of the supported names.
    #[error("{LOG_FORMAT_VAR} must be `compact` or `json`, got {0:?}")]
    InvalidLogFormat(String),

    /// The connection pool could not be created.
    #[error("cannot build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Database settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// How long to wait for a pooled connection.
    pub connect_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: 8,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for a test database with a small pool.
    #[must_use]
    pub fn for_tests(database_url: impl Into<String>) -> Self {
        Self {
            database_url: Some(database_url.into()),
            pool_size: 4,
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric variable is set
    /// but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric variable is set
    /// but does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let pool_size = match lookup(POOL_SIZE_VAR) {
            Some(raw) => parse_positive(POOL_SIZE_VAR, &raw)?,
            None => defaults.pool_size,
        };
        let connect_timeout = match lookup(CONNECT_TIMEOUT_VAR) {
            Some(raw) => Duration::from_secs(u64::from(parse_positive(CONNECT_TIMEOUT_VAR, &raw)?)),
            None => defaults.connect_timeout,
        };
        Ok(Self {
            database_url: lookup(DATABASE_URL_VAR).filter(|url| !url.trim().is_empty()),
            pool_size,
            connect_timeout,
        })
    }

    /// Builds a connection pool from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] without a URL, or
    /// [`ConfigError::Pool`] when the pool cannot open its first connection.
    pub fn build_pool(&self) -> Result<TodoPgPool, ConfigError> {
        let url = self
            .database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        Ok(Pool::builder()
            .max_size(self.pool_size)
            .connection_timeout(self.connect_timeout)
            .build(ConnectionManager::<PgConnection>::new(url))?)
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            var,
            value: raw.to_owned(),
        })
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl TryFrom<&str> for LogFormat {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidLogFormat(other.to_owned())),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// `tracing` filter directives.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "crosslist=info,warn".to_owned(),
            format: LogFormat::Compact,
        }
    }
}

impl TelemetryConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogFormat`] for an unknown format.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogFormat`] for an unknown format.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => LogFormat::try_from(raw.as_str())?,
            None => defaults.format,
        };
        Ok(Self {
            filter: lookup(LOG_FILTER_VAR)
                .filter(|directives| !directives.trim().is_empty())
                .unwrap_or(defaults.filter),
            format,
        })
    }
}
