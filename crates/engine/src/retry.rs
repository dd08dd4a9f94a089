//! Retrying transactional executor.
//!
//! Wraps [`run_in_transaction`] in a bounded retry loop:
//! 1. Each attempt gets a fresh transaction; a failed one is never resumed.
//! 2. Errors the caller's [`Retryable`] impl calls transient are retried up
//!    to `max_retries` times with linear back-off.
//! 3. Anything else is returned immediately, tagged [`RetryError::Failed`].
//! 4. Running out of retries returns the *last* error, tagged
//!    [`RetryError::Exhausted`].

use std::fmt::Display;

use tracing::{info, instrument, warn};

use db::{DbError, TransactionalStore};

use crate::transaction::{run_in_transaction, UnitOfWork};
use crate::{ConfigError, RetryConfig, RetryError, Retryable};

/// Runs units of work against a borrowed store, retrying transient failures.
pub struct RetryingExecutor<'s, S> {
    store: &'s S,
    config: RetryConfig,
}

impl<'s, S: TransactionalStore> RetryingExecutor<'s, S> {
    /// Create an executor.
    ///
    /// # Errors
    /// [`ConfigError`] if `config` has a zero retry count or delay.
    pub fn new(store: &'s S, config: RetryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn store(&self) -> &'s S {
        self.store
    }

    /// Run `work` until it commits, fails permanently, or retries run out.
    ///
    /// `work` is called once per attempt, each time with a new transaction.
    ///
    /// # Errors
    /// - [`RetryError::Failed`] for a non-retryable error (no retry made).
    /// - [`RetryError::Exhausted`] after `max_retries + 1` retryable failures.
    #[instrument(skip_all, fields(max_retries = self.config.max_retries))]
    pub async fn run<T, E, F>(&self, mut work: F) -> Result<T, RetryError<E>>
    where
        E: Retryable + From<DbError> + Display,
        F: for<'c> FnMut(&'c mut S::Tx) -> UnitOfWork<'c, T, E>,
    {
        let mut attempts = 0u32;

        loop {
            attempts += 1;

            match run_in_transaction(self.store, &mut work).await {
                Ok(value) => {
                    if attempts > 1 {
                        info!("transaction committed on attempt {}", attempts);
                    }
                    return Ok(value);
                }

                Err(err) if !err.is_retryable() => {
                    return Err(RetryError::Failed { attempts, source: err });
                }

                Err(err) => {
                    let retry = attempts;
                    if retry > self.config.max_retries {
                        warn!(
                            "transaction failed after {} retries, giving up: {}",
                            self.config.max_retries, err
                        );
                        return Err(RetryError::Exhausted { attempts, source: err });
                    }

                    let delay = self.config.delay_for_retry(retry);
                    warn!(
                        "retryable transaction error (retry {}/{}), retrying in {:?}: {}",
                        retry, self.config.max_retries, delay, err
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
