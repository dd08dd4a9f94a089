//! Postgres connection pool, wrapped in an explicitly owned client.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the Postgres pool owned by a [`DbClient`].
pub type DbPool = PgPool;

/// Handle to the payroll database.
///
/// Created once at process start with [`DbClient::connect`], handed by
/// reference to whatever needs it, and shut down with [`DbClient::close`].
/// Cloning is cheap and shares the same underlying pool.
#[derive(Debug, Clone)]
pub struct DbClient {
    pool: DbPool,
}

impl DbClient {
    /// Open a pool against `database_url`.
    ///
    /// `max_connections` controls the pool ceiling.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        info!("Connecting to database (max_connections={})", max_connections);
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Close every connection and wait for checked-out ones to be returned.
    pub async fn close(self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}
