//! Response types for the Attendance Engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{CheckInError, CheckOutError, EngineError};
use crate::models::AttendanceRecord;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// The caller did not identify themselves.
    pub fn missing_identity(header_name: &str) -> Self {
        Self::with_details(
            "MISSING_IDENTITY",
            "Employee identity is required",
            format!("Send the employee id in the '{}' header", header_name),
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// A 400 with the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

fn status_of(error: &EngineError) -> (StatusCode, &'static str) {
    match error {
        EngineError::ConfigNotFound { .. }
        | EngineError::ConfigParseError { .. }
        | EngineError::InvalidSettings { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
        }
        EngineError::ProfileNotFound { .. } => (StatusCode::NOT_FOUND, "PROFILE_NOT_FOUND"),
        EngineError::InactiveEmployee { .. } => (StatusCode::FORBIDDEN, "INACTIVE_EMPLOYEE"),
        EngineError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        EngineError::EmployeeExists { .. } => (StatusCode::CONFLICT, "EMPLOYEE_EXISTS"),
        EngineError::InvalidEmployee { .. } => (StatusCode::BAD_REQUEST, "INVALID_EMPLOYEE"),
        EngineError::RecordNotFound { .. } => (StatusCode::NOT_FOUND, "RECORD_NOT_FOUND"),
        EngineError::CheckIn(CheckInError::OutOfWindow { .. }) => {
            (StatusCode::BAD_REQUEST, "OUTSIDE_CHECK_IN_WINDOW")
        }
        EngineError::CheckIn(CheckInError::AlreadyCheckedIn) => {
            (StatusCode::CONFLICT, "ALREADY_CHECKED_IN")
        }
        EngineError::CheckOut(CheckOutError::OutOfWindow { .. }) => {
            (StatusCode::BAD_REQUEST, "OUTSIDE_CHECK_OUT_WINDOW")
        }
        EngineError::CheckOut(CheckOutError::NotCheckedIn) => {
            (StatusCode::BAD_REQUEST, "NOT_CHECKED_IN")
        }
        EngineError::CheckOut(CheckOutError::AlreadyCheckedOut) => {
            (StatusCode::CONFLICT, "ALREADY_CHECKED_OUT")
        }
        EngineError::CheckOut(CheckOutError::TooSoon { .. }) => {
            (StatusCode::BAD_REQUEST, "MINIMUM_WORK_NOT_MET")
        }
        EngineError::InvalidOverride { .. } => (StatusCode::BAD_REQUEST, "INVALID_OVERRIDE"),
        EngineError::InvalidLeaveRequest { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_LEAVE_REQUEST")
        }
        EngineError::InvalidDateRange { .. } => (StatusCode::BAD_REQUEST, "INVALID_DATE_RANGE"),
        EngineError::LeaveNotFound { .. } => (StatusCode::NOT_FOUND, "LEAVE_NOT_FOUND"),
        EngineError::LeaveAlreadyReviewed { .. } => {
            (StatusCode::CONFLICT, "LEAVE_ALREADY_REVIEWED")
        }
        EngineError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = status_of(&error);
        let error = if status.is_server_error() {
            ApiError::with_details(code, "Internal server error", error.to_string())
        } else {
            ApiError::new(code, error.to_string())
        };
        ApiErrorResponse { status, error }
    }
}

/// Body returned by check-in and check-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceActionResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The record after the action.
    pub record: AttendanceRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeWindow;
    use chrono::{NaiveDate, NaiveTime};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_out_of_window_is_bad_request_with_window_message() {
        let error: EngineError = CheckInError::OutOfWindow {
            at: time(9, 30),
            window: TimeWindow::new(time(8, 0), time(9, 0)),
        }
        .into();
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "OUTSIDE_CHECK_IN_WINDOW");
        assert!(response.error.message.contains("between 08:00 and 09:00"));
    }

    #[test]
    fn test_duplicates_are_conflicts() {
        let response: ApiErrorResponse = EngineError::from(CheckInError::AlreadyCheckedIn).into();
        assert_eq!(response.status, StatusCode::CONFLICT);

        let response: ApiErrorResponse = EngineError::from(CheckOutError::AlreadyCheckedOut).into();
        assert_eq!(response.status, StatusCode::CONFLICT);

        let response: ApiErrorResponse = EngineError::EmployeeExists {
            employee_id: "EMP001".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "EMPLOYEE_EXISTS");

        let response: ApiErrorResponse = EngineError::LeaveAlreadyReviewed {
            id: 1,
            status: "approved".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_lookup_and_permission_statuses() {
        let not_found: ApiErrorResponse = EngineError::RecordNotFound {
            employee_id: "EMP001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
        }
        .into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let forbidden: ApiErrorResponse = EngineError::InactiveEmployee {
            employee_id: "EMP004".to_string(),
        }
        .into();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
        assert_eq!(forbidden.error.code, "INACTIVE_EMPLOYEE");
    }

    #[test]
    fn test_storage_error_uses_generic_message() {
        let response: ApiErrorResponse = EngineError::Storage {
            message: "attendance table lock poisoned".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.message, "Internal server error");
        assert!(response.error.details.is_some());
    }
}
