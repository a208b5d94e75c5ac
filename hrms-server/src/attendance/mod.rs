//! Attendance state machine and the day window it operates in

pub mod machine;

use chrono::{DateTime, Local, NaiveDate, Utc};
use shared::models::AttendanceRecord;
use shared::util::{local_day_bounds, local_today};

pub use machine::{TransitionError, apply};

/// `[start, end)` of one server-local calendar day, in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn today() -> Self {
        Self::for_day(local_today())
    }

    /// The local day `at` falls on
    pub fn containing(at: DateTime<Utc>) -> Self {
        Self::for_day(at.with_timezone(&Local).date_naive())
    }

    pub fn for_day(day: NaiveDate) -> Self {
        let (start, end) = local_day_bounds(day);
        Self { start, end }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Result of an atomic read-then-append attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied(AttendanceRecord),
    Rejected(TransitionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_contains_now() {
        assert!(DayWindow::today().contains(Utc::now()));
    }

    #[test]
    fn test_containing_respects_midnight() {
        let today = DayWindow::today();
        let just_before = today.start - chrono::Duration::milliseconds(1);
        assert_eq!(DayWindow::containing(today.start), today);
        assert_eq!(DayWindow::containing(just_before).end, today.start);
        assert!(DayWindow::containing(just_before).contains(just_before));
    }

    #[test]
    fn test_windows_are_adjacent() {
        let today = local_today();
        let tomorrow = today.succ_opt().unwrap();
        assert_eq!(DayWindow::for_day(today).end, DayWindow::for_day(tomorrow).start);
    }
}
