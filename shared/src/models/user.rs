//! User and Employee Models
//!
//! None of these types carry the password hash; it never leaves storage.

use super::role::Role;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity attached to an authenticated request and returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub position: Option<String>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Full employee record as shown to admins and to the employee themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub position: Option<String>,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
            department_id: self.department_id,
            position: self.position.clone(),
        }
    }
}

/// Active employee offered as a performance review target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCandidate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: Option<String>,
    pub department_name: Option<String>,
}

/// Self-registration payload
///
/// `role` is accepted on the wire but never honoured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Department name, resolved case-insensitively
    pub department: Option<String>,
    pub position: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token plus the identity it was issued for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Self-service profile update; `department` is a department name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// Admin-side employee creation payload (also used for admin accounts)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeCreate {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub department_id: Option<i64>,
    pub position: Option<String>,
    pub salary: Option<Decimal>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

/// Partial employee update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department_id: Option<i64>,
    pub position: Option<String>,
    pub salary: Option<Decimal>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl EmployeeUpdate {
    /// True when the update touches fields only an admin may change
    pub fn touches_admin_fields(&self) -> bool {
        self.salary.is_some() || self.department_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveUpdate {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_ignores_missing_fields() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@b.co","role":"admin"}"#).unwrap();
        assert_eq!(req.email, "a@b.co");
        assert!(req.password.is_empty());
        assert_eq!(req.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_auth_payload_omits_absent_token() {
        let payload = AuthPayload {
            user: UserProfile {
                id: 1,
                email: "a@b.co".into(),
                first_name: "A".into(),
                last_name: "B".into(),
                role: Role::Employee,
                department_id: None,
                position: None,
            },
            token: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["user"]["role"], "employee");
    }

    #[test]
    fn test_update_admin_fields() {
        let update = EmployeeUpdate {
            phone: Some("555".into()),
            ..Default::default()
        };
        assert!(!update.touches_admin_fields());
        let update = EmployeeUpdate {
            salary: Some(Decimal::new(5000, 0)),
            ..Default::default()
        };
        assert!(update.touches_admin_fields());
    }
}
