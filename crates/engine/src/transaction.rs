//! Transactional executor.
//!
//! Runs one unit of work inside one store transaction: commit on success,
//! roll back on failure, and hand the outcome back untouched.

use futures_util::future::BoxFuture;
use tracing::{debug, error};

use db::{DbError, TransactionalStore};

/// The future a unit of work returns.  It may borrow the transaction for
/// `'c` and nothing beyond it.
pub type UnitOfWork<'c, T, E> = BoxFuture<'c, Result<T, E>>;

/// Run `work` in a fresh transaction from `store`.
///
/// On `Ok` the transaction is committed and the value returned unchanged.
/// On `Err` the transaction is rolled back and the error returned unchanged.
/// Exactly one commit or one rollback happens per call.
///
/// # Errors
/// - `work`'s own error, after rollback.
/// - A [`DbError`] from `begin` or `commit`, converted into `E`.
///
/// A rollback that itself fails is logged; the unit of work's error is still
/// the one returned.
pub async fn run_in_transaction<S, T, E, F>(store: &S, work: F) -> Result<T, E>
where
    S: TransactionalStore,
    E: From<DbError>,
    F: for<'c> FnOnce(&'c mut S::Tx) -> UnitOfWork<'c, T, E>,
{
    let mut tx = store.begin().await?;

    match work(&mut tx).await {
        Ok(value) => {
            store.commit(tx).await?;
            debug!("transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = store.rollback(tx).await {
                error!("rollback failed after unit-of-work error: {}", rollback_err);
            } else {
                debug!("transaction rolled back");
            }
            Err(err)
        }
    }
}
