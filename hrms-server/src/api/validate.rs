//! Request field checks shared by the handlers

use chrono::{DateTime, NaiveDate};
use shared::error::FieldError;

// Column widths in the users and leaves tables
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_POSITION_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_LEAVE_TYPE_LEN: usize = 50;

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Non-empty after trimming
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Trimmed, `None` when blank
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Field error when `value` has more than `max_len` characters
pub fn too_long(field: &str, value: &str, max_len: usize) -> Option<FieldError> {
    let len = value.chars().count();
    (len > max_len).then(|| FieldError::new(field, format!("{field} is too long ({len} chars, max {max_len})")))
}

/// [`too_long`] for optional fields; `None` always passes
pub fn optional_too_long(field: &str, value: Option<&str>, max_len: usize) -> Option<FieldError> {
    value.and_then(|v| too_long(field, v, max_len))
}

/// `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|t| t.date_naive()))
}
