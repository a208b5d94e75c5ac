//! Daily check-in / check-out transitions
//!
//! ```text
//!              checkin               checkout
//! NotCheckedIn ───────▶ CheckedIn ───────▶ CheckedOut
//! ```
//!
//! One pair per day: a checkin after checkout is rejected like a second checkin.

use shared::error::{AppError, ErrorCode};
use shared::models::{AttendanceStatus, CheckAction, DayStatus};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Already checked in today")]
    AlreadyCheckedIn,
    #[error("Must check in before checking out")]
    MustCheckInFirst,
}

impl TransitionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::AlreadyCheckedIn => ErrorCode::AlreadyCheckedIn,
            Self::MustCheckInFirst => ErrorCode::MustCheckInFirst,
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        AppError::new(e.code())
    }
}

/// The status to record for `action`, or why it is not allowed
pub fn apply(current: DayStatus, action: CheckAction) -> Result<AttendanceStatus, TransitionError> {
    match (current, action) {
        (DayStatus::NotCheckedIn, CheckAction::Checkin) => Ok(AttendanceStatus::CheckedIn),
        (DayStatus::CheckedIn, CheckAction::Checkout) => Ok(AttendanceStatus::CheckedOut),
        (DayStatus::CheckedIn | DayStatus::CheckedOut, CheckAction::Checkin) => {
            Err(TransitionError::AlreadyCheckedIn)
        }
        (DayStatus::NotCheckedIn | DayStatus::CheckedOut, CheckAction::Checkout) => {
            Err(TransitionError::MustCheckInFirst)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_table() {
        use CheckAction::*;
        use DayStatus::*;

        let cases = [
            (NotCheckedIn, Checkin, Ok(AttendanceStatus::CheckedIn)),
            (NotCheckedIn, Checkout, Err(TransitionError::MustCheckInFirst)),
            (CheckedIn, Checkin, Err(TransitionError::AlreadyCheckedIn)),
            (CheckedIn, Checkout, Ok(AttendanceStatus::CheckedOut)),
            (CheckedOut, Checkin, Err(TransitionError::AlreadyCheckedIn)),
            (CheckedOut, Checkout, Err(TransitionError::MustCheckInFirst)),
        ];
        for (current, action, expected) in cases {
            assert_eq!(apply(current, action), expected, "{current:?} + {action:?}");
        }
    }

    #[test]
    fn test_error_messages_match_codes() {
        for err in [TransitionError::AlreadyCheckedIn, TransitionError::MustCheckInFirst] {
            assert_eq!(err.to_string(), err.code().message());
            assert_eq!(AppError::from(err).code, err.code());
        }
    }
}
