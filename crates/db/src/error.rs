//! Typed error type for the db crate.

use thiserror::Error;

/// SQLSTATE codes that describe a transient condition: the same statement
/// may succeed if the transaction is started again.
const RETRYABLE_SQLSTATES: &[&str] = &[
    "40001", // serialization_failure
    "40P01", // deadlock_detected
    "57P01", // admin_shutdown
    "57P02", // crash_shutdown
    "57P03", // cannot_connect_now
];

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,
}

impl DbError {
    /// Whether starting a fresh transaction could make this error go away.
    ///
    /// Connection loss, pool exhaustion, serialization conflicts and
    /// deadlocks qualify.  Constraint violations, missing rows and anything
    /// the caller's own SQL got wrong do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Sqlx(sqlx::Error::Io(_)) | Self::Sqlx(sqlx::Error::PoolTimedOut) => true,
            Self::Sqlx(sqlx::Error::Database(db_err)) => db_err
                .code()
                .is_some_and(|code| is_retryable_sqlstate(&code)),
            Self::Sqlx(_) | Self::NotFound => false,
        }
    }
}

/// Classify a raw Postgres SQLSTATE.  Class `08` (connection exception) is
/// retryable as a whole.
pub fn is_retryable_sqlstate(code: &str) -> bool {
    code.starts_with("08") || RETRYABLE_SQLSTATES.contains(&code)
}
