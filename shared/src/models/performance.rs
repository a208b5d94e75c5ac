//! Performance Review Models

use super::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub employee_id: i64,
    pub reviewer_id: i64,
    pub rating: i32,
    pub comments: Option<String>,
}

/// A review of one employee, with the reviewer's name and role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeReview {
    pub id: i64,
    pub rating: i32,
    pub comments: Option<String>,
    pub review_date: DateTime<Utc>,
    pub reviewer_first_name: Option<String>,
    pub reviewer_last_name: Option<String>,
    pub reviewer_role: Option<Role>,
}

/// Review listing row for admins and managers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOverview {
    pub id: i64,
    pub rating: i32,
    pub comments: Option<String>,
    pub review_date: DateTime<Utc>,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub employee_email: String,
    pub employee_position: Option<String>,
    pub employee_department: Option<String>,
    pub reviewer_first_name: Option<String>,
    pub reviewer_last_name: Option<String>,
    pub reviewer_role: Option<Role>,
}

/// `POST /performance/:employeeId` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub rating: Option<i32>,
    pub comments: Option<String>,
}

impl ReviewCreate {
    /// The rating when present and within range
    pub fn valid_rating(&self) -> Option<i32> {
        self.rating.filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let rated = |rating| ReviewCreate {
            rating,
            comments: None,
        };
        assert_eq!(rated(Some(1)).valid_rating(), Some(1));
        assert_eq!(rated(Some(5)).valid_rating(), Some(5));
        assert_eq!(rated(Some(0)).valid_rating(), None);
        assert_eq!(rated(Some(6)).valid_rating(), None);
        assert_eq!(rated(None).valid_rating(), None);
    }
}
