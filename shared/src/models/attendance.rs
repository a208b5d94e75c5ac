//! Attendance Models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a stored attendance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "Checked In")]
    CheckedIn,
    #[serde(rename = "Checked Out")]
    CheckedOut,
}

impl AttendanceStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckedIn => "Checked In",
            Self::CheckedOut => "Checked Out",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "Checked In" => Some(Self::CheckedIn),
            "Checked Out" => Some(Self::CheckedOut),
            _ => None,
        }
    }
}

/// A user's state for the current day
///
/// `NotCheckedIn` is never stored; it is what an empty day looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayStatus {
    NotCheckedIn,
    CheckedIn,
    CheckedOut,
}

impl DayStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotCheckedIn => "Not checked in",
            Self::CheckedIn => "Checked In",
            Self::CheckedOut => "Checked Out",
        }
    }
}

impl From<Option<AttendanceStatus>> for DayStatus {
    fn from(latest: Option<AttendanceStatus>) -> Self {
        match latest {
            None => Self::NotCheckedIn,
            Some(AttendanceStatus::CheckedIn) => Self::CheckedIn,
            Some(AttendanceStatus::CheckedOut) => Self::CheckedOut,
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Requested attendance transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckAction {
    Checkin,
    Checkout,
}

impl CheckAction {
    /// Accepts exactly `checkin` or `checkout`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "checkin" => Some(Self::Checkin),
            "checkout" => Some(Self::Checkout),
            _ => None,
        }
    }

    /// Wire value, the inverse of [`CheckAction::parse`]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checkin => "checkin",
            Self::Checkout => "checkout",
        }
    }

    /// Past-tense verb used in the confirmation message
    pub const fn past_tense(&self) -> &'static str {
        match self {
            Self::Checkin => "checked in",
            Self::Checkout => "checked out",
        }
    }
}

/// One append-only attendance entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub user_id: i64,
    pub status: AttendanceStatus,
    pub check_time: DateTime<Utc>,
    pub notes: Option<String>,
}

/// `POST /attendance/check` body; the action is validated by hand so that a
/// bad value gets the documented 400 message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckRequest {
    pub action: Option<String>,
    pub notes: Option<String>,
}

/// `{success, status}` / `{success, status, message}` bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceStatusResponse {
    pub success: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Attendance history row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceHistoryEntry {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_time: DateTime<Utc>,
}
