//! Connectivity check.

use sqlx::PgConnection;

use crate::DbError;

/// Round-trip a trivial statement.
pub async fn ping(conn: &mut PgConnection) -> Result<(), DbError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&mut *conn)
        .await?;
    Ok(())
}
