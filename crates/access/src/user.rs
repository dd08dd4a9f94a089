//! The authenticated user as the rest of the system sees it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Login identifier.
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    /// Set when the account belongs to an employee record.
    pub employee_id: Option<Uuid>,
}

impl User {
    /// Convenience constructor for testing.
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            role,
            is_active: true,
            employee_id: None,
        }
    }
}
