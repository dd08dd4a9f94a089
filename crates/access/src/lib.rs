//! `access` crate — the payroll user model and role-based capability lookup.
//!
//! Everything here is a pure function of a user's [`Role`]; enforcement of
//! row-level scoping belongs to whatever sits at the API boundary.

pub mod capabilities;
pub mod error;
pub mod role;
pub mod user;

pub use capabilities::Capabilities;
pub use error::RoleParseError;
pub use role::Role;
pub use user::User;
