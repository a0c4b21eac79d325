//! Request types for the Attendance Engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::leave::LeaveDecision;
use crate::models::{AttendanceStatus, Department, Employee, LeaveType, NewLeaveRequest, Role};

/// Body of `POST /leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveSubmission {
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Why the leave is needed.
    pub reason: String,
}

impl From<LeaveSubmission> for NewLeaveRequest {
    fn from(req: LeaveSubmission) -> Self {
        NewLeaveRequest {
            leave_type: req.leave_type,
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason,
        }
    }
}

/// Body of `PUT /admin/leave/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveReview {
    /// Approve or reject.
    pub decision: LeaveDecision,
    /// Reviewer's comments.
    #[serde(default)]
    pub comments: String,
}

/// Body of `PUT /admin/attendance/:employee_id/:date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOverride {
    /// The status to set.
    pub status: AttendanceStatus,
    /// Replacement notes; existing notes are kept when omitted.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /admin/employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRegistration {
    /// Unique employee code.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Department.
    pub department: Department,
    /// Role.
    pub role: Role,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Hire date; defaults to today.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl EmployeeRegistration {
    /// Builds an active employee, hired `today` unless a date was given.
    pub fn into_employee(self, today: NaiveDate) -> Employee {
        Employee {
            id: self.id.trim().to_string(),
            full_name: self.full_name,
            department: self.department,
            role: self.role,
            position: self.position,
            hire_date: self.hire_date.unwrap_or(today),
            is_active: true,
        }
    }
}

/// Query string of `GET /attendance/history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryParams {
    /// First day; defaults to the first of the current month.
    pub start_date: Option<NaiveDate>,
    /// Last day; defaults to today.
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_defaults_hire_date_to_today() {
        let json = r#"{
            "id": " EMP010 ",
            "full_name": "Grace Hopper",
            "department": "it",
            "role": "staff"
        }"#;
        let registration: EmployeeRegistration = serde_json::from_str(json).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
        let employee = registration.into_employee(today);
        assert_eq!(employee.id, "EMP010");
        assert_eq!(employee.hire_date, today);
        assert!(employee.is_active);
        assert!(employee.position.is_empty());
    }

    #[test]
    fn test_leave_submission_deserializes() {
        let json = r#"{
            "leave_type": "sick",
            "start_date": "2026-02-02",
            "end_date": "2026-02-03",
            "reason": "Flu"
        }"#;
        let submission: LeaveSubmission = serde_json::from_str(json).unwrap();
        let request: NewLeaveRequest = submission.into();
        assert_eq!(request.leave_type, LeaveType::Sick);
        assert_eq!(request.reason, "Flu");
    }

    #[test]
    fn test_review_comments_default_to_empty() {
        let review: LeaveReview = serde_json::from_str(r#"{"decision": "rejected"}"#).unwrap();
        assert_eq!(review.decision, LeaveDecision::Rejected);
        assert!(review.comments.is_empty());
    }

    #[test]
    fn test_status_override_deserializes() {
        let body: StatusOverride = serde_json::from_str(r#"{"status": "half_day"}"#).unwrap();
        assert_eq!(body.status, AttendanceStatus::HalfDay);
        assert!(body.notes.is_none());
    }
}
