//! Capability flags derived from a user's role.
//!
//! This is a lookup table, not a permission engine: no persistence, no
//! interaction with the checks the API performs.

use serde::Serialize;

use crate::{Role, User};

/// What the current user may do with payroll data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// May open the payroll area at all.
    pub has_payroll_access: bool,
    /// May create, process and approve payroll runs.
    pub can_manage_payroll: bool,
    /// May view their own record-scoped payroll data.
    pub can_view_payroll: bool,
}

impl Capabilities {
    /// All flags off.
    pub const NONE: Self = Self {
        has_payroll_access: false,
        can_manage_payroll: false,
        can_view_payroll: false,
    };

    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin | Role::PayrollOfficer => Self {
                has_payroll_access: true,
                can_manage_payroll: true,
                can_view_payroll: true,
            },
            Role::HrOfficer => Self {
                has_payroll_access: true,
                can_manage_payroll: false,
                can_view_payroll: true,
            },
            Role::Employee => Self {
                has_payroll_access: false,
                can_manage_payroll: false,
                can_view_payroll: true,
            },
        }
    }

    /// `None` means nobody is signed in.
    pub fn for_user(user: Option<&User>) -> Self {
        user.map_or(Self::NONE, |u| Self::for_role(u.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User::new("jdoe", "jdoe@example.com", role)
    }

    #[test]
    fn payroll_officer_can_access_and_manage() {
        let caps = Capabilities::for_user(Some(&user(Role::PayrollOfficer)));
        assert!(caps.has_payroll_access);
        assert!(caps.can_manage_payroll);
        assert!(caps.can_view_payroll);
    }

    #[test]
    fn employee_can_only_view() {
        let caps = Capabilities::for_user(Some(&user(Role::Employee)));
        assert!(!caps.has_payroll_access);
        assert!(!caps.can_manage_payroll);
        assert!(caps.can_view_payroll);
    }

    #[test]
    fn hr_officer_has_access_but_cannot_manage() {
        let caps = Capabilities::for_role(Role::HrOfficer);
        assert!(caps.has_payroll_access);
        assert!(!caps.can_manage_payroll);
    }

    #[test]
    fn admin_has_everything() {
        let caps = Capabilities::for_role(Role::Admin);
        assert_eq!(
            caps,
            Capabilities {
                has_payroll_access: true,
                can_manage_payroll: true,
                can_view_payroll: true,
            }
        );
    }

    #[test]
    fn no_user_has_nothing() {
        assert_eq!(Capabilities::for_user(None), Capabilities::NONE);
        assert_eq!(Capabilities::default(), Capabilities::NONE);
    }

    #[test]
    fn every_authenticated_role_can_view() {
        assert!(Role::ALL.iter().all(|&r| Capabilities::for_role(r).can_view_payroll));
    }

    #[test]
    fn serialises_with_camel_case_flags() {
        let json = serde_json::to_value(Capabilities::for_role(Role::Employee)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hasPayrollAccess": false,
                "canManagePayroll": false,
                "canViewPayroll": true
            })
        );
    }
}
