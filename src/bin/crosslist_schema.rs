//! Creates or updates the crosslist tables.
//!
//! Usage:
//!
//! ```text
//! CROSSLIST_DATABASE_URL=postgres://user@host/db crosslist_schema
//! ```
//!
//! Logging follows `CROSSLIST_LOG` and `CROSSLIST_LOG_FORMAT`. Running the
//! tool against an up-to-date database changes nothing.

use crosslist::{
    config::{ConfigError, StoreConfig, TelemetryConfig},
    schema, telemetry,
};
use thiserror::Error;
use tracing::{error, info};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum SchemaToolError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot check out a connection: {0}")]
    Connection(#[from] diesel::r2d2::PoolError),
    #[error("migration failed: {0}")]
    Migration(#[from] diesel::result::Error),
}

fn migrate() -> Result<(), SchemaToolError> {
    let pool = StoreConfig::from_env()?.build_pool()?;
    let mut connection = pool.get()?;
    schema::apply(&mut connection)?;
    info!("schema is up to date");
    Ok(())
}

// Errors raised before logging is installed reach stderr through the
// returned `Result`.
fn main() -> Result<(), BoxError> {
    telemetry::init(&TelemetryConfig::from_env()?)?;
    migrate().map_err(|err| {
        error!(error = %err, "schema tool failed");
        err.into()
    })
}
