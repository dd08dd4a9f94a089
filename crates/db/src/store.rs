//! The `TransactionalStore` trait — the only thing the engine needs from a
//! data store.

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};

use crate::{DbClient, DbError};

/// Opens, commits and rolls back atomic units of work.
///
/// `Tx` is the store's native transaction handle.  It is moved into
/// `commit`/`rollback`, so a finished transaction cannot be used again.
#[async_trait]
pub trait TransactionalStore: Send + Sync {
    type Tx: Send;

    async fn begin(&self) -> Result<Self::Tx, DbError>;

    async fn commit(&self, tx: Self::Tx) -> Result<(), DbError>;

    async fn rollback(&self, tx: Self::Tx) -> Result<(), DbError>;
}

#[async_trait]
impl TransactionalStore for DbClient {
    type Tx = Transaction<'static, Postgres>;

    async fn begin(&self) -> Result<Self::Tx, DbError> {
        Ok(self.pool().begin().await?)
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), DbError> {
        tx.commit().await?;
        Ok(())
    }

    async fn rollback(&self, tx: Self::Tx) -> Result<(), DbError> {
        tx.rollback().await?;
        Ok(())
    }
}
