//! Unified error codes for the HRMS workspace
//!
//! Error codes are shared by the server, the client and any dashboard that
//! consumes the API. They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Attendance errors
//! - 4xxx: Leave errors
//! - 5xxx: Performance review errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Route not found
    RouteNotFound = 9,

    // ==================== 1xxx: Auth ====================
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// No bearer token on the request
    MissingToken = 1005,
    /// Token resolved to a deleted or deactivated user
    UserNotFoundOrInactive = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin or manager role required
    AdminOrManagerRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Cannot modify admin user
    CannotModifyAdmin = 2004,

    // ==================== 3xxx: Attendance ====================
    /// Already checked in today
    AlreadyCheckedIn = 3001,
    /// Checkout without a check-in today
    MustCheckInFirst = 3002,
    /// Unknown attendance action
    InvalidAttendanceAction = 3003,

    // ==================== 4xxx: Leave ====================
    /// Leave request not found
    LeaveNotFound = 4001,
    /// Leave starts in the past
    LeaveStartInPast = 4002,
    /// Leave ends before it starts
    LeaveEndBeforeStart = 4003,
    /// Leave already decided, cannot be deleted
    LeaveAlreadyDecided = 4004,
    /// Unknown leave status
    InvalidLeaveStatus = 4005,

    // ==================== 5xxx: Performance ====================
    /// Rating outside 1..=5
    InvalidRating = 5001,
    /// Review target not found or inactive
    ReviewTargetNotFound = 5002,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Email already registered
    DuplicateEmail = 8002,
    /// Password too short
    PasswordTooShort = 8003,
    /// Unknown role
    InvalidRole = 8004,
    /// Department id does not exist
    DepartmentNotFound = 8005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage unreachable or pool exhausted
    StorageUnavailable = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Missing required fields",
            Self::RouteNotFound => "Route not found",

            // Auth
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::MissingToken => "Access token required",
            Self::UserNotFoundOrInactive => "User not found or inactive",

            // Permission
            Self::PermissionDenied => "Access denied",
            Self::AdminOrManagerRequired => "Admin or manager access required",
            Self::AdminRequired => "Admin access required",
            Self::CannotModifyAdmin => "Cannot modify admin user",

            // Attendance
            Self::AlreadyCheckedIn => "Already checked in today",
            Self::MustCheckInFirst => "Must check in before checking out",
            Self::InvalidAttendanceAction => "Invalid action. Use \"checkin\" or \"checkout\"",

            // Leave
            Self::LeaveNotFound => "Leave not found",
            Self::LeaveStartInPast => "Start date cannot be in the past",
            Self::LeaveEndBeforeStart => "End date must be after start date",
            Self::LeaveAlreadyDecided => "Cannot delete approved/rejected leave",
            Self::InvalidLeaveStatus => "Invalid status",

            // Performance
            Self::InvalidRating => "Rating must be between 1 and 5",
            Self::ReviewTargetNotFound => "Employee not found or inactive",

            // Employee
            Self::EmployeeNotFound => "Employee not found",
            Self::DuplicateEmail => "User with this email already exists",
            Self::PasswordTooShort => "Password must be at least 6 characters long",
            Self::InvalidRole => "Invalid role",
            Self::DepartmentNotFound => "Department not found",

            // System
            Self::InternalError => "Internal server error",
            Self::StorageUnavailable => "Storage unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            5 => Ok(Self::InvalidRequest),
            7 => Ok(Self::RequiredField),
            9 => Ok(Self::RouteNotFound),

            // Auth
            1002 => Ok(Self::InvalidCredentials),
            1003 => Ok(Self::TokenExpired),
            1004 => Ok(Self::TokenInvalid),
            1005 => Ok(Self::MissingToken),
            1006 => Ok(Self::UserNotFoundOrInactive),

            // Permission
            2001 => Ok(Self::PermissionDenied),
            2002 => Ok(Self::AdminOrManagerRequired),
            2003 => Ok(Self::AdminRequired),
            2004 => Ok(Self::CannotModifyAdmin),

            // Attendance
            3001 => Ok(Self::AlreadyCheckedIn),
            3002 => Ok(Self::MustCheckInFirst),
            3003 => Ok(Self::InvalidAttendanceAction),

            // Leave
            4001 => Ok(Self::LeaveNotFound),
            4002 => Ok(Self::LeaveStartInPast),
            4003 => Ok(Self::LeaveEndBeforeStart),
            4004 => Ok(Self::LeaveAlreadyDecided),
            4005 => Ok(Self::InvalidLeaveStatus),

            // Performance
            5001 => Ok(Self::InvalidRating),
            5002 => Ok(Self::ReviewTargetNotFound),

            // Employee
            8001 => Ok(Self::EmployeeNotFound),
            8002 => Ok(Self::DuplicateEmail),
            8003 => Ok(Self::PasswordTooShort),
            8004 => Ok(Self::InvalidRole),
            8005 => Ok(Self::DepartmentNotFound),

            // System
            9001 => Ok(Self::InternalError),
            9003 => Ok(Self::StorageUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
