//! `engine` crate — transactional execution with retry, and chunked batch
//! execution.
//!
//! Every building block is generic over the data store (via
//! [`db::TransactionalStore`]) and over the caller's error type, so route
//! handlers and operator tools can compose them without the engine knowing
//! anything about payroll tables.

pub mod batch;
pub mod config;
pub mod error;
pub mod retry;
pub mod transaction;

pub use batch::run_batched;
pub use config::{BatchConfig, RetryConfig};
pub use error::{ConfigError, RetryError, Retryable};
pub use retry::RetryingExecutor;
pub use transaction::{run_in_transaction, UnitOfWork};
