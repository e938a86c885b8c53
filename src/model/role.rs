use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    /// Roles entitled to the team review views.
    pub fn is_reviewer(self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn roles_round_trip_through_strings() {
        for role in [Role::Admin, Role::Manager, Role::Employee] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("Hr").is_err());
        assert!(Role::from_str("admin").is_err());
    }

    #[test]
    fn reviewer_roles() {
        assert!(Role::Admin.is_reviewer());
        assert!(Role::Manager.is_reviewer());
        assert!(!Role::Employee.is_reviewer());
    }
}
