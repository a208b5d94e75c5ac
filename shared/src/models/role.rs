//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
///
/// Stored in the `users.role` column as its lowercase name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Employee,
    Manager,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Parse the stored column value; unknown values yield `None`
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "employee" => Some(Self::Employee),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db(&s.trim().to_ascii_lowercase()).ok_or_else(|| format!("unknown role: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip_through_column() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            assert_eq!(Role::from_db(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_db("superuser"), None);
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"employee\"").unwrap();
        assert_eq!(role, Role::Employee);
    }
}
