//! Leave request model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Sick leave.
    Sick,
    /// Vacation.
    Vacation,
    /// Personal leave.
    Personal,
    /// Emergency leave.
    Emergency,
    /// Maternity leave.
    Maternity,
    /// Paternity leave.
    Paternity,
}

/// Review state of a leave request. Moves from `Pending` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Approved by HR or a manager.
    Approved,
    /// Rejected by HR or a manager.
    Rejected,
}

impl LeaveStatus {
    /// Returns the lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

/// The fields an employee supplies when asking for leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeaveRequest {
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Why the leave is needed.
    pub reason: String,
}

/// A stored leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Store-assigned identifier.
    pub id: u64,
    /// The requesting employee.
    pub employee_id: String,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Why the leave is needed.
    pub reason: String,
    /// Review state.
    pub status: LeaveStatus,
    /// When the request was submitted.
    pub applied_at: NaiveDateTime,
    /// The employee who reviewed the request.
    pub reviewed_by: Option<String>,
    /// When the request was reviewed.
    pub reviewed_at: Option<NaiveDateTime>,
    /// Reviewer's comments.
    #[serde(default)]
    pub admin_comments: String,
}

impl LeaveRequest {
    /// Number of calendar days requested, both ends included.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{LeaveRequest, LeaveStatus, LeaveType};
    /// use chrono::NaiveDate;
    ///
    /// let leave = LeaveRequest {
    ///     id: 1,
    ///     employee_id: "EMP001".to_string(),
    ///     leave_type: LeaveType::Vacation,
    ///     start_date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 2, 6).unwrap(),
    ///     reason: "Family trip".to_string(),
    ///     status: LeaveStatus::Pending,
    ///     applied_at: NaiveDate::from_ymd_opt(2026, 1, 20).unwrap().and_hms_opt(10, 0, 0).unwrap(),
    ///     reviewed_by: None,
    ///     reviewed_at: None,
    ///     admin_comments: String::new(),
    /// };
    /// assert_eq!(leave.duration_days(), 5);
    /// ```
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Returns true if the request is approved and includes `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.status == LeaveStatus::Approved && self.start_date <= date && date <= self.end_date
    }

    /// Returns true if the date ranges of the two requests share a day.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}
