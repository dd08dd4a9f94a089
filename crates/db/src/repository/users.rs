//! User account queries.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{models::UserRow, DbError};

/// Fetch a single user by primary key.
pub async fn get_user(conn: &mut PgConnection, id: Uuid) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, email, role, is_active, employee_id, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Set `is_active` on a user and return the updated row.
///
/// Returns `DbError::NotFound` if no row matched.
pub async fn set_user_active(
    conn: &mut PgConnection,
    id: Uuid,
    active: bool,
) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET is_active = $1
        WHERE id = $2
        RETURNING id, username, email, role, is_active, employee_id, created_at
        "#,
    )
    .bind(active)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}
