//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Attendance errors
/// - 4xxx: Leave errors
/// - 5xxx: Performance review errors
/// - 8xxx: Employee errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Attendance errors (3xxx)
    Attendance,
    /// Leave errors (4xxx)
    Leave,
    /// Performance review errors (5xxx)
    Performance,
    /// Employee errors (8xxx)
    Employee,
    /// System errors (9xxx, and the unused 6xxx-7xxx ranges)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Attendance,
            4000..5000 => Self::Leave,
            5000..6000 => Self::Performance,
            8000..9000 => Self::Employee,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Attendance => "attendance",
            Self::Leave => "leave",
            Self::Performance => "performance",
            Self::Employee => "employee",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
