//! The closed set of roles a payroll user can hold.

use serde::{Deserialize, Serialize};

use crate::RoleParseError;

/// A user's role.  Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    HrOfficer,
    PayrollOfficer,
    Employee,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::HrOfficer,
        Role::PayrollOfficer,
        Role::Employee,
    ];

    /// Wire name as stored in the `users.role` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin          => "ADMIN",
            Self::HrOfficer      => "HR_OFFICER",
            Self::PayrollOfficer => "PAYROLL_OFFICER",
            Self::Employee       => "EMPLOYEE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    /// Accepts the wire name in any case, with `-` or `_` as separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalised.as_str() {
            "ADMIN"           => Ok(Self::Admin),
            "HR_OFFICER"      => Ok(Self::HrOfficer),
            "PAYROLL_OFFICER" => Ok(Self::PayrollOfficer),
            "EMPLOYEE"        => Ok(Self::Employee),
            _                 => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_from_str_agree() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn parsing_is_lenient_about_case_and_dashes() {
        assert_eq!("payroll-officer".parse::<Role>(), Ok(Role::PayrollOfficer));
        assert_eq!(" hr_officer ".parse::<Role>(), Ok(Role::HrOfficer));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(
            "SUPERUSER".parse::<Role>(),
            Err(RoleParseError("SUPERUSER".into()))
        );
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::PayrollOfficer).unwrap();
        assert_eq!(json, "\"PAYROLL_OFFICER\"");
        let back: Role = serde_json::from_str("\"HR_OFFICER\"").unwrap();
        assert_eq!(back, Role::HrOfficer);
    }
}
