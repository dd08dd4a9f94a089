//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no domain behaviour.
//! The domain `User` lives in the `access` crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted user account row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    /// Login identifier.
    pub username: String,
    pub email: String,
    /// Role wire name (`ADMIN`, `HR_OFFICER`, `PAYROLL_OFFICER`, `EMPLOYEE`).
    pub role: String,
    pub is_active: bool,
    /// Linked employee record, if this account belongs to an employee.
    pub employee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
