//! Connection pool setup.

use crate::{DatabaseConfig, SqlError, SqlResult};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use std::time::Duration;
use verba_log::{debug, info};

/// Open an [`AnyPool`] for `config`.
///
/// The driver is picked from the URL scheme. In-memory SQLite URLs get a
/// single connection that never expires, so every query sees the same
/// database.
pub async fn connect(config: &DatabaseConfig) -> SqlResult<AnyPool> {
    sqlx::any::install_default_drivers();

    info!("Connecting to message database");
    debug!("Database URL: {}", redact(&config.database_url));

    let mut options = AnyPoolOptions::new().acquire_timeout(Duration::from_secs(config.connect_timeout_secs));

    options = if config.is_in_memory() {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
    };

    let pool = options
        .connect(&config.database_url)
        .await
        .map_err(|e| SqlError::Connection(e.to_string()))?;

    info!("Message database connection established");
    Ok(pool)
}

/// Connect using `VERBA_DATABASE_*` environment variables.
pub async fn connect_from_env() -> SqlResult<AnyPool> {
    let config = DatabaseConfig::from_env()?;
    connect(&config).await
}

// strip credentials before logging
fn redact(url: &str) -> &str {
    match url.find('@') {
        Some(at) => match url.find("://") {
            Some(scheme) if scheme < at => &url[..scheme + 3],
            _ => "<redacted>",
        },
        None => url,
    }
}
