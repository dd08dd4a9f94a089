//! Access-level error type.

use thiserror::Error;

/// Returned when a role name does not match any known [`crate::Role`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: '{0}'")]
pub struct RoleParseError(pub String);
