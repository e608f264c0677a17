//! Database connection pool management
//!
//! Uses a lazily connecting sqlx PgPool so the server can start (and
//! report the failure through the liveness probe) while the database is
//! still unreachable.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DbConfig;

/// How long a handler waits for a free connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Create a PostgreSQL connection pool from settings.
///
/// No connection is opened until the first query.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::from_env());
/// let store = PgUserStore::new(pool);
/// ```
pub fn create_pool(config: &DbConfig) -> PgPool {
    create_pool_with_options(config, config.max_connections)
}

/// Create a PostgreSQL connection pool with a custom connection limit.
pub fn create_pool_with_options(config: &DbConfig, max_connections: u32) -> PgPool {
    tracing::debug!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections,
        "creating connection pool"
    );

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy_with(config.connect_options())
}
