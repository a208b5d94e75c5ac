//! Leave Request Models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Stored leave request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    pub id: i64,
    pub user_id: i64,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub approved_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Leave joined with requester and approver names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveView {
    #[serde(flatten)]
    pub leave: Leave,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub approver_first_name: Option<String>,
    pub approver_last_name: Option<String>,
}

/// Validated insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeave {
    pub user_id: i64,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

/// `POST /leaves` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveCreate {
    pub leave_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveStatusUpdate {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStats {
    pub total_leaves: i64,
    pub pending_leaves: i64,
    pub approved_leaves: i64,
    pub rejected_leaves: i64,
}

impl LeaveStats {
    pub fn count(&mut self, status: LeaveStatus) {
        self.total_leaves += 1;
        match status {
            LeaveStatus::Pending => self.pending_leaves += 1,
            LeaveStatus::Approved => self.approved_leaves += 1,
            LeaveStatus::Rejected => self.rejected_leaves += 1,
        }
    }
}
