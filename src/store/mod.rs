//! Storage boundary.
//!
//! The engine never talks to a database directly. It needs three
//! collaborators: an employee directory, an attendance record store and a
//! leave request store. Updates go through compare-and-swap so that two
//! requests racing on the same row cannot both win; a relational backend
//! would implement this as `UPDATE ... WHERE <old values>` and report
//! whether a row was affected.

mod memory;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Employee, LeaveRequest, NewLeaveRequest};

pub use memory::MemoryStore;

/// Filter for [`AttendanceStore::query`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AttendanceQuery {
    /// Earliest date, inclusive.
    pub start_date: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub end_date: Option<NaiveDate>,
    /// Restrict to one employee.
    pub employee_id: Option<String>,
}

impl AttendanceQuery {
    /// Returns true if `record` passes the filter.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.start_date.is_none_or(|start| record.date >= start)
            && self.end_date.is_none_or(|end| record.date <= end)
            && self
                .employee_id
                .as_deref()
                .is_none_or(|id| record.employee_id == id)
    }
}

/// Read access to employee profiles.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee by id.
    fn find_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// Returns every employee, ordered by id.
    fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Adds a new employee. Returns false, leaving the directory unchanged,
    /// if the id is already taken.
    ///
    /// Must be atomic: of two concurrent inserts with the same id, one wins.
    fn insert_employee(&self, employee: Employee) -> EngineResult<bool>;
}

/// Attendance records keyed by (employee, date).
pub trait AttendanceStore: Send + Sync {
    /// Returns the record for the day, creating an absent one if none exists.
    ///
    /// Must be atomic: concurrent callers observe the same single record.
    fn get_or_create(&self, employee_id: &str, date: NaiveDate) -> EngineResult<AttendanceRecord>;

    /// Returns the record for the day if one exists.
    fn find(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>>;

    /// Replaces the stored record with `replacement` only if it still equals
    /// `expected`. Returns whether the swap happened.
    fn compare_and_swap(
        &self,
        expected: &AttendanceRecord,
        replacement: AttendanceRecord,
    ) -> EngineResult<bool>;

    /// Returns matching records, newest date first, then by employee id.
    fn query(&self, query: &AttendanceQuery) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Leave requests.
pub trait LeaveStore: Send + Sync {
    /// Stores a new pending request and returns it with its assigned id.
    ///
    /// Refuses the request with [`check_overlap`](crate::leave::check_overlap)'s
    /// error if it shares a day with one of the employee's pending or
    /// approved requests. The check and the insert must be atomic, so two
    /// overlapping submissions racing each other cannot both be stored.
    fn insert_leave(
        &self,
        employee_id: &str,
        request: NewLeaveRequest,
        applied_at: NaiveDateTime,
    ) -> EngineResult<LeaveRequest>;

    /// Looks up a request by id.
    fn find_leave(&self, id: u64) -> EngineResult<Option<LeaveRequest>>;

    /// Returns requests, newest application first, optionally for one employee.
    fn list_leaves(&self, employee_id: Option<&str>) -> EngineResult<Vec<LeaveRequest>>;

    /// Replaces the stored request only if it still equals `expected`.
    fn compare_and_swap_leave(
        &self,
        expected: &LeaveRequest,
        replacement: LeaveRequest,
    ) -> EngineResult<bool>;
}
