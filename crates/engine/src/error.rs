//! Engine-level error types.

use thiserror::Error;

use db::DbError;

/// Classifies an error as transient (worth a fresh attempt) or permanent.
///
/// Implement this for the error type your units of work return.  Keep the
/// transient set narrow: a retried unit of work repeats every side effect
/// it performs outside the transaction.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for DbError {
    fn is_retryable(&self) -> bool {
        DbError::is_retryable(self)
    }
}

/// Rejected executor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_retries must be a positive integer, got {0}")]
    MaxRetries(u32),

    #[error("retry base delay must be a positive number of milliseconds, got {0}")]
    RetryBaseDelay(u128),

    #[error("batch_size must be a positive integer, got {0}")]
    BatchSize(usize),
}

/// Failure of a [`crate::RetryingExecutor`] run.
///
/// Both variants carry the underlying error unchanged; the variant tells the
/// caller whether retrying was even attempted.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// A non-retryable error, returned as soon as it occurred.
    #[error("{source}")]
    Failed {
        attempts: u32,
        #[source]
        source: E,
    },

    /// Every attempt failed with a retryable error; `source` is the last one.
    #[error("gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
}

impl<E> RetryError<E> {
    /// Number of attempts made, including the first.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Failed { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Borrow the underlying error.
    pub fn source_error(&self) -> &E {
        match self {
            Self::Failed { source, .. } | Self::Exhausted { source, .. } => source,
        }
    }

    /// Discard the tag and return the underlying error.
    pub fn into_inner(self) -> E {
        match self {
            Self::Failed { source, .. } | Self::Exhausted { source, .. } => source,
        }
    }
}
