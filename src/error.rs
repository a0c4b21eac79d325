//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Evaluator failures ([`CheckInError`], [`CheckOutError`]) are expected,
//! user-facing outcomes; [`EngineError`] wraps them together with the
//! configuration, lookup and storage failures of the surrounding layers.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::config::TimeWindow;

/// Why a check-in attempt was refused.
///
/// # Example
///
/// ```
/// use attendance_engine::error::CheckInError;
///
/// assert_eq!(
///     CheckInError::AlreadyCheckedIn.to_string(),
///     "You have already checked in today"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckInError {
    /// The attempt happened outside the configured check-in window.
    #[error("Check-in not allowed at {}. {}", .at.format("%H:%M:%S"), .window.describe("Check-in"))]
    OutOfWindow {
        /// The wall-clock time of the attempt.
        at: NaiveTime,
        /// The configured check-in window.
        window: TimeWindow,
    },

    /// The record already carries a check-in time.
    #[error("You have already checked in today")]
    AlreadyCheckedIn,
}

/// Why a check-out attempt was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckOutError {
    /// The attempt happened outside the configured check-out window.
    #[error("Check-out not allowed at {}. {}", .at.format("%H:%M:%S"), .window.describe("Check-out"))]
    OutOfWindow {
        /// The wall-clock time of the attempt.
        at: NaiveTime,
        /// The configured check-out window.
        window: TimeWindow,
    },

    /// There is no check-in to close.
    #[error("You need to check in first")]
    NotCheckedIn,

    /// The record already carries a check-out time.
    #[error("You have already checked out today")]
    AlreadyCheckedOut,

    /// Less than the minimum work duration has elapsed since check-in.
    #[error("You must work at least {minimum_minutes} minutes before checking out ({elapsed_minutes} elapsed)")]
    TooSoon {
        /// Whole minutes elapsed since check-in (negative if the clock went backwards).
        elapsed_minutes: i64,
        /// The configured minimum.
        minimum_minutes: u32,
    },
}

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A settings value is out of range or inconsistent.
    #[error("Invalid attendance setting '{field}': {message}")]
    InvalidSettings {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The identity has no associated employee record.
    #[error("Employee profile not found: {employee_id}")]
    ProfileNotFound {
        /// The identity that was looked up.
        employee_id: String,
    },

    /// The employee exists but is deactivated.
    #[error("Employee '{employee_id}' is not active")]
    InactiveEmployee {
        /// The deactivated employee.
        employee_id: String,
    },

    /// The employee's role does not permit the action.
    #[error("Access denied: {action} requires an HR or manager role")]
    Forbidden {
        /// The action that was attempted.
        action: String,
    },

    /// An employee with the id already exists.
    #[error("Employee ID already exists: {employee_id}")]
    EmployeeExists {
        /// The duplicate id.
        employee_id: String,
    },

    /// A new employee profile failed validation.
    #[error("Invalid employee: {message}")]
    InvalidEmployee {
        /// What is wrong with the profile.
        message: String,
    },

    /// No attendance record exists for the employee on the date.
    #[error("No attendance record for '{employee_id}' on {date}")]
    RecordNotFound {
        /// The employee.
        employee_id: String,
        /// The calendar date.
        date: NaiveDate,
    },

    /// A check-in was refused.
    #[error(transparent)]
    CheckIn(#[from] CheckInError),

    /// A check-out was refused.
    #[error(transparent)]
    CheckOut(#[from] CheckOutError),

    /// An administrative status override was refused.
    #[error("Invalid status override: {message}")]
    InvalidOverride {
        /// Why the override was refused.
        message: String,
    },

    /// A leave request failed validation.
    #[error("Invalid leave request: {message}")]
    InvalidLeaveRequest {
        /// A description of what made the request invalid.
        message: String,
    },

    /// A requested date range ends before it starts.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// No leave request exists with the given id.
    #[error("Leave request not found: {id}")]
    LeaveNotFound {
        /// The requested id.
        id: u64,
    },

    /// The leave request has already been approved or rejected.
    #[error("Leave request {id} has already been {status}")]
    LeaveAlreadyReviewed {
        /// The leave request id.
        id: u64,
        /// The status it was reviewed to.
        status: String,
    },

    /// The backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
