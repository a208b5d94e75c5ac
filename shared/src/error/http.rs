//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::RouteNotFound
            | Self::LeaveNotFound
            | Self::ReviewTargetNotFound
            | Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized: the client should discard its token
            Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::MissingToken
            | Self::UserNotFoundOrInactive => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::AdminOrManagerRequired
            | Self::AdminRequired
            | Self::CannotModifyAdmin => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::StorageUnavailable => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request: validation, business rules, duplicates and
            // dangling references in the body
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::LeaveNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::EmployeeNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_unauthorized_status() {
        for code in [
            ErrorCode::MissingToken,
            ErrorCode::TokenInvalid,
            ErrorCode::TokenExpired,
            ErrorCode::UserNotFoundOrInactive,
            ErrorCode::InvalidCredentials,
        ] {
            assert_eq!(code.http_status(), StatusCode::UNAUTHORIZED, "{code:?}");
        }
    }

    #[test]
    fn test_forbidden_status() {
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::AdminRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::AdminOrManagerRequired.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_bad_request_status() {
        // Business rules and duplicates stay 400, never 409
        assert_eq!(
            ErrorCode::DuplicateEmail.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::AlreadyCheckedIn.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::MustCheckInFirst.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::LeaveStartInPast.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::DepartmentNotFound.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_status() {
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::StorageUnavailable.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
