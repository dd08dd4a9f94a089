//! `db` crate — pure persistence layer.
//!
//! Provides the explicitly constructed [`DbClient`], the [`TransactionalStore`]
//! seam the engine runs units of work through, typed row structs, and
//! repository functions for the `users` table.  No business logic lives here.

pub mod error;
pub mod mock;
pub mod models;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::DbError;
pub use pool::{DbClient, DbPool};
pub use store::TransactionalStore;
