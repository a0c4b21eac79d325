//! Leave request rules.
//!
//! Like the attendance evaluator, these are pure functions: the caller
//! supplies the employee, the existing requests and the current time, and
//! persists the result.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveRequest, LeaveStatus, NewLeaveRequest};

/// A reviewer's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveDecision {
    /// Grant the leave.
    Approved,
    /// Refuse the leave.
    Rejected,
}

impl From<LeaveDecision> for LeaveStatus {
    fn from(decision: LeaveDecision) -> Self {
        match decision {
            LeaveDecision::Approved => LeaveStatus::Approved,
            LeaveDecision::Rejected => LeaveStatus::Rejected,
        }
    }
}

/// Checks a new request from `employee` on its own merits.
///
/// Overlap with earlier requests is checked separately by
/// [`check_overlap`], which the store runs under its write lock.
///
/// # Errors
///
/// - [`EngineError::InactiveEmployee`] if the employee is deactivated
/// - [`EngineError::InvalidLeaveRequest`] if the end date precedes the
///   start date or the reason is blank
pub fn validate_new_leave(employee: &Employee, request: &NewLeaveRequest) -> EngineResult<()> {
    if !employee.is_active {
        return Err(EngineError::InactiveEmployee {
            employee_id: employee.id.clone(),
        });
    }

    if request.end_date < request.start_date {
        return Err(invalid("end_date must not be before start_date"));
    }

    if request.reason.trim().is_empty() {
        return Err(invalid("reason must not be empty"));
    }

    Ok(())
}

/// Refuses a request that shares a day with one of `employee_id`'s pending
/// or approved requests in `existing`. Rejected requests never clash.
///
/// # Errors
///
/// [`EngineError::InvalidLeaveRequest`] naming the first clashing request.
pub fn check_overlap(
    employee_id: &str,
    request: &NewLeaveRequest,
    existing: &[LeaveRequest],
) -> EngineResult<()> {
    let clash = existing.iter().find(|leave| {
        leave.employee_id == employee_id
            && leave.status != LeaveStatus::Rejected
            && leave.overlaps(request.start_date, request.end_date)
    });
    match clash {
        Some(clash) => Err(invalid(&format!(
            "overlaps {} leave request {} ({} to {})",
            clash.status.as_str(),
            clash.id,
            clash.start_date,
            clash.end_date
        ))),
        None => Ok(()),
    }
}

/// Applies `reviewer`'s decision to `leave`, returning the updated request.
///
/// # Errors
///
/// - [`EngineError::Forbidden`] if the reviewer is not HR or a manager
/// - [`EngineError::InvalidLeaveRequest`] if the reviewer owns the request
/// - [`EngineError::LeaveAlreadyReviewed`] if the request is not pending
///
/// # Examples
///
/// ```
/// use attendance_engine::leave::{review_leave, LeaveDecision};
/// use attendance_engine::models::*;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
/// let now = day.and_hms_opt(10, 0, 0).unwrap();
/// let reviewer = Employee {
///     id: "HR001".to_string(),
///     full_name: "Frances Allen".to_string(),
///     department: Department::Hr,
///     role: Role::Hr,
///     position: String::new(),
///     hire_date: NaiveDate::from_ymd_opt(2019, 6, 15).unwrap(),
///     is_active: true,
/// };
/// let leave = LeaveRequest {
///     id: 1,
///     employee_id: "EMP001".to_string(),
///     leave_type: LeaveType::Sick,
///     start_date: day,
///     end_date: day,
///     reason: "Flu".to_string(),
///     status: LeaveStatus::Pending,
///     applied_at: now,
///     reviewed_by: None,
///     reviewed_at: None,
///     admin_comments: String::new(),
/// };
///
/// let reviewed = review_leave(&leave, &reviewer, LeaveDecision::Approved, "Get well", now).unwrap();
/// assert_eq!(reviewed.status, LeaveStatus::Approved);
/// assert_eq!(reviewed.reviewed_by.as_deref(), Some("HR001"));
/// ```
pub fn review_leave(
    leave: &LeaveRequest,
    reviewer: &Employee,
    decision: LeaveDecision,
    comments: &str,
    now: NaiveDateTime,
) -> EngineResult<LeaveRequest> {
    if !reviewer.role.is_admin() || !reviewer.is_active {
        return Err(EngineError::Forbidden {
            action: "reviewing leave".to_string(),
        });
    }

    if reviewer.id == leave.employee_id {
        return Err(invalid("employees cannot review their own leave"));
    }

    if leave.status != LeaveStatus::Pending {
        return Err(EngineError::LeaveAlreadyReviewed {
            id: leave.id,
            status: leave.status.as_str().to_string(),
        });
    }

    let mut updated = leave.clone();
    updated.status = decision.into();
    updated.reviewed_by = Some(reviewer.id.clone());
    updated.reviewed_at = Some(now);
    updated.admin_comments = comments.to_string();
    Ok(updated)
}

fn invalid(message: &str) -> EngineError {
    EngineError::InvalidLeaveRequest {
        message: message.to_string(),
    }
}
