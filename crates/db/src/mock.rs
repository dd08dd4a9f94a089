//! `MockStore` — an in-memory test double for [`TransactionalStore`].
//!
//! Records every begin/commit/rollback and the writes each transaction made,
//! so tests can check commit/rollback counts and that rolled-back writes
//! never become visible.

use std::io;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{DbError, TransactionalStore};

/// Transaction handle handed to units of work running against a [`MockStore`].
#[derive(Debug)]
pub struct MockTx {
    /// Sequence number, starting at 1 for the first `begin`.
    pub id: u64,
    writes: Vec<String>,
}

impl MockTx {
    /// Stage a write; it becomes visible only if the transaction commits.
    pub fn write(&mut self, value: impl Into<String>) {
        self.writes.push(value.into());
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

/// A store that keeps committed writes in memory.
#[derive(Debug, Default)]
pub struct MockStore {
    begins: AtomicU64,
    commits: AtomicU32,
    rollbacks: AtomicU32,
    /// Number of upcoming calls that fail, per operation.
    failing_begins: AtomicU32,
    failing_commits: AtomicU32,
    failing_rollbacks: AtomicU32,
    committed: Mutex<Vec<String>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` begins fail with a pool acquire timeout.
    pub fn fail_next_begins(&self, count: u32) {
        self.failing_begins.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` commits fail with a transient I/O error.
    pub fn fail_next_commits(&self, count: u32) {
        self.failing_commits.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` rollbacks fail with a transient I/O error.
    pub fn fail_next_rollbacks(&self, count: u32) {
        self.failing_rollbacks.store(count, Ordering::SeqCst);
    }

    /// Calls to `begin`, including failed ones.
    pub fn begin_count(&self) -> u64 {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn commit_count(&self) -> u32 {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollback_count(&self) -> u32 {
        self.rollbacks.load(Ordering::SeqCst)
    }

    /// All writes from successfully committed transactions, in commit order.
    pub fn committed(&self) -> Vec<String> {
        self.lock_committed().clone()
    }

    /// Consume one injected failure from `counter`, if any are left.
    fn take_failure(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn lock_committed(&self) -> MutexGuard<'_, Vec<String>> {
        self.committed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn connection_reset() -> DbError {
    DbError::Sqlx(sqlx::Error::Io(io::Error::from(io::ErrorKind::ConnectionReset)))
}

#[async_trait]
impl TransactionalStore for MockStore {
    type Tx = MockTx;

    async fn begin(&self) -> Result<MockTx, DbError> {
        let id = self.begins.fetch_add(1, Ordering::SeqCst) + 1;
        if Self::take_failure(&self.failing_begins) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(MockTx { id, writes: Vec::new() })
    }

    async fn commit(&self, tx: MockTx) -> Result<(), DbError> {
        if Self::take_failure(&self.failing_commits) {
            // A failed commit leaves nothing behind, same as the real thing.
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            return Err(connection_reset());
        }

        self.lock_committed().extend(tx.writes);
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&self, _tx: MockTx) -> Result<(), DbError> {
        // The writes are dropped either way; only successful rollbacks count.
        if Self::take_failure(&self.failing_rollbacks) {
            return Err(connection_reset());
        }
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
