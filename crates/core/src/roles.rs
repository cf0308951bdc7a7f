//! User roles.
//!
//! A user's role is fixed at registration. The string forms must match the
//! `CHECK` constraint on `users.role` in the initial migration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_INNOVATOR: &str = "innovator";
pub const ROLE_REVIEWER: &str = "reviewer";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_INNOVATOR, ROLE_REVIEWER, ROLE_ADMIN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Innovator,
    Reviewer,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Innovator => ROLE_INNOVATOR,
            Role::Reviewer => ROLE_REVIEWER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_INNOVATOR => Ok(Role::Innovator),
            ROLE_REVIEWER => Ok(Role::Reviewer),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_parse_from_their_names() {
        for name in VALID_ROLES {
            let role: Role = name.parse().expect("valid role");
            assert_eq!(role.as_str(), *name);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = "superuser".parse::<Role>();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid role"));
    }

    #[test]
    fn test_role_names_are_case_sensitive() {
        assert!("Admin".parse::<Role>().is_err());
    }
}
