//! Reporting models: summaries, dashboards and the admin overview.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceRecord, Department, Employee};

/// Attendance statistics over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range.
    pub end_date: NaiveDate,
    /// Calendar days in the range.
    pub total_days: i64,
    /// Days marked present or late.
    pub present_days: u32,
    /// Days marked late.
    pub late_days: u32,
    /// Days with a record marked absent.
    pub absent_days: u32,
    /// Days overridden to half-day.
    pub half_days: u32,
    /// Sum of work hours.
    pub total_work_hours: Decimal,
    /// Sum of per-day hours above the overtime threshold.
    pub overtime_hours: Decimal,
}

/// A role-specific dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Dashboard {
    /// Organisation-wide head counts.
    Manager {
        /// Employees in the directory.
        total_employees: usize,
        /// Employees with the staff role.
        staff_count: usize,
        /// Employees with the HR role.
        hr_count: usize,
        /// Present or late today.
        present_count: usize,
        /// Late today.
        late_count: usize,
        /// The viewer's own record for today.
        own_record: Option<AttendanceRecord>,
    },
    /// Department statistics for HR.
    Hr {
        /// Employees in the directory.
        total_employees: usize,
        /// Active employees.
        active_employees: usize,
        /// Head count per department.
        department_counts: BTreeMap<Department, usize>,
        /// Present or late today.
        present_count: usize,
        /// Late today.
        late_count: usize,
        /// Total minus present.
        absent_count: usize,
        /// The viewer's own record for today.
        own_record: Option<AttendanceRecord>,
    },
    /// A staff member's view of their department.
    Staff {
        /// The viewer's department.
        department: Department,
        /// Human-readable department name.
        department_name: String,
        /// Other employees in the department.
        colleagues: Vec<Employee>,
        /// The viewer's own record for today.
        own_record: Option<AttendanceRecord>,
    },
}

/// Organisation-wide counts for administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOverview {
    /// The day the counts are for.
    pub date: NaiveDate,
    /// Active employees.
    pub active_employees: usize,
    /// Present or late today.
    pub present_today: usize,
    /// Leave requests awaiting review.
    pub pending_leaves: usize,
    /// Approved leave covering today.
    pub on_leave_today: usize,
}

/// Today's record together with what the employee may do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayStatus {
    /// Today's record; absent with no timestamps if nothing happened yet.
    pub record: AttendanceRecord,
    /// Whether a check-in would pass the window and lifecycle checks now.
    pub can_check_in: bool,
    /// Whether a check-out would pass the window and lifecycle checks now.
    pub can_check_out: bool,
    /// Human-readable check-in window, e.g. "Check-in allowed between 07:00 and 11:00".
    pub check_in_window: String,
    /// Human-readable check-out window.
    pub check_out_window: String,
}

/// An employee's records over a range with their summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceHistory {
    /// Records in the range, newest first.
    pub records: Vec<AttendanceRecord>,
    /// Counts over the same range.
    pub summary: AttendanceSummary,
}

/// An employee's profile with this month's attendance figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// The employee.
    pub employee: Employee,
    /// Full years since the hire date.
    pub years_of_service: u32,
    /// The month the figures cover, e.g. "January 2026".
    pub month_name: String,
    /// Days this month marked present or late.
    pub present_days: u32,
    /// Days this month marked late.
    pub late_days: u32,
    /// Work hours logged this month.
    pub total_work_hours: Decimal,
    /// Days of approved leave starting this calendar year.
    pub approved_leave_days: i64,
}
