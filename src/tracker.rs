//! The attendance tracker.
//!
//! [`AttendanceTracker`] is the layer between a caller's identity and the
//! pure rules in [`evaluation`](crate::evaluation), [`leave`](crate::leave)
//! and [`reporting`](crate::reporting). For every request it resolves the
//! employee, reads the clock once, loads or lazily creates the record,
//! evaluates, and writes the result back with compare-and-swap. A refused
//! first attempt of the day stores nothing.
//!
//! A lost compare-and-swap means another request changed the row between
//! our read and our write. The tracker then re-reads and evaluates again,
//! so the loser of two racing check-ins sees
//! [`CheckInError::AlreadyCheckedIn`](crate::error::CheckInError::AlreadyCheckedIn)
//! rather than overwriting the winner.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::AttendanceSettings;
use crate::error::{EngineError, EngineResult};
use crate::evaluation::{
    can_check_in, can_check_out, override_status, perform_check_in, perform_check_out,
};
use crate::leave::{review_leave, validate_new_leave, LeaveDecision};
use crate::models::{
    AdminOverview, AttendanceHistory, AttendanceRecord, AttendanceStatus, Dashboard, Employee,
    EmployeeProfile, LeaveRequest, NewLeaveRequest, TodayStatus,
};
use crate::reporting::{admin_overview, build_dashboard, employee_profile, summarize_attendance};
use crate::store::{AttendanceQuery, AttendanceStore, EmployeeDirectory, LeaveStore};

/// Upper bound on re-read/re-evaluate rounds before giving up.
///
/// Each lost round means some other request made progress on the same row,
/// and every transition is one-way, so a handful of rounds is plenty.
pub const MAX_SWAP_ATTEMPTS: usize = 8;

/// Coordinates storage, the clock and the evaluation rules.
pub struct AttendanceTracker {
    settings: AttendanceSettings,
    employees: Arc<dyn EmployeeDirectory>,
    attendance: Arc<dyn AttendanceStore>,
    leaves: Arc<dyn LeaveStore>,
    clock: Arc<dyn Clock>,
}

impl AttendanceTracker {
    /// Creates a tracker over a single store implementing all three traits.
    pub fn new<S>(settings: AttendanceSettings, store: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: EmployeeDirectory + AttendanceStore + LeaveStore + 'static,
    {
        Self {
            settings,
            employees: store.clone(),
            attendance: store.clone(),
            leaves: store,
            clock,
        }
    }

    /// Creates a tracker over separate stores.
    pub fn with_stores(
        settings: AttendanceSettings,
        employees: Arc<dyn EmployeeDirectory>,
        attendance: Arc<dyn AttendanceStore>,
        leaves: Arc<dyn LeaveStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            employees,
            attendance,
            leaves,
            clock,
        }
    }

    /// The settings every evaluation runs against.
    pub fn settings(&self) -> &AttendanceSettings {
        &self.settings
    }

    /// Today's date according to the tracker's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    /// Checks `employee_id` in for today.
    pub fn check_in(&self, employee_id: &str) -> EngineResult<AttendanceRecord> {
        let employee = self.resolve_active(employee_id)?;
        let now = self.clock.now();

        let record = self.swap_attendance(&employee.id, now.date(), |current| {
            Ok(perform_check_in(&self.settings, current, now)?)
        })?;

        info!(
            employee_id = %employee.id,
            status = record.status.display_name(),
            at = %now,
            "Checked in"
        );
        Ok(record)
    }

    /// Checks `employee_id` out for today.
    pub fn check_out(&self, employee_id: &str) -> EngineResult<AttendanceRecord> {
        let employee = self.resolve_active(employee_id)?;
        let now = self.clock.now();

        let record = self.swap_attendance(&employee.id, now.date(), |current| {
            Ok(perform_check_out(&self.settings, current, now)?)
        })?;

        info!(
            employee_id = %employee.id,
            work_hours = ?record.work_hours,
            at = %now,
            "Checked out"
        );
        Ok(record)
    }

    /// Today's record and whether check-in or check-out is currently possible.
    ///
    /// Does not create a record.
    pub fn status(&self, employee_id: &str) -> EngineResult<TodayStatus> {
        let employee = self.resolve_active(employee_id)?;
        let now = self.clock.now();
        let record = self
            .attendance
            .find(&employee.id, now.date())?
            .unwrap_or_else(|| AttendanceRecord::new(employee.id.clone(), now.date()));

        Ok(TodayStatus {
            can_check_in: can_check_in(&self.settings, &record, now),
            can_check_out: can_check_out(&self.settings, &record, now),
            check_in_window: self.settings.check_in_window.describe("Check-in"),
            check_out_window: self.settings.check_out_window.describe("Check-out"),
            record,
        })
    }

    /// The employee's own records and summary over `[start, end]`.
    ///
    /// Defaults to the first of the current month through today.
    pub fn history(
        &self,
        employee_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> EngineResult<AttendanceHistory> {
        let employee = self.resolve(employee_id)?;
        let today = self.today();
        let start = start.unwrap_or_else(|| first_of_month(today));
        let end = end.unwrap_or(today);
        if start > end {
            return Err(EngineError::InvalidDateRange { start, end });
        }

        let records = self.attendance.query(&AttendanceQuery {
            start_date: Some(start),
            end_date: Some(end),
            employee_id: Some(employee.id.clone()),
        })?;
        let summary = summarize_attendance(&records, start, end, &self.settings);

        debug!(
            employee_id = %employee.id,
            %start,
            %end,
            records = records.len(),
            "Built attendance history"
        );
        Ok(AttendanceHistory { records, summary })
    }

    /// Files a leave request for `employee_id`.
    pub fn submit_leave(
        &self,
        employee_id: &str,
        request: NewLeaveRequest,
    ) -> EngineResult<LeaveRequest> {
        let employee = self.resolve(employee_id)?;
        validate_new_leave(&employee, &request)?;

        let leave = self
            .leaves
            .insert_leave(&employee.id, request, self.clock.now())?;
        info!(
            employee_id = %employee.id,
            leave_id = leave.id,
            start = %leave.start_date,
            end = %leave.end_date,
            "Leave request submitted"
        );
        Ok(leave)
    }

    /// The employee's own leave requests, newest first.
    pub fn my_leaves(&self, employee_id: &str) -> EngineResult<Vec<LeaveRequest>> {
        let employee = self.resolve(employee_id)?;
        self.leaves.list_leaves(Some(&employee.id))
    }

    /// The employee's profile with this month's attendance figures.
    pub fn profile(&self, employee_id: &str) -> EngineResult<EmployeeProfile> {
        let employee = self.resolve(employee_id)?;
        let today = self.today();
        let records = self.attendance.query(&AttendanceQuery {
            start_date: Some(first_of_month(today)),
            end_date: Some(today),
            employee_id: Some(employee.id.clone()),
        })?;
        let leaves = self.leaves.list_leaves(Some(&employee.id))?;
        Ok(employee_profile(&employee, today, &records, &leaves, &self.settings))
    }

    /// The role dashboard for `employee_id`.
    pub fn dashboard(&self, employee_id: &str) -> EngineResult<Dashboard> {
        let viewer = self.resolve(employee_id)?;
        let employees = self.employees.list_employees()?;
        let today_records = self.records_for(self.today())?;
        Ok(build_dashboard(&viewer, &employees, &today_records))
    }

    /// Organisation-wide counts for today. HR and managers only.
    pub fn admin_overview(&self, viewer_id: &str) -> EngineResult<AdminOverview> {
        self.resolve_admin(viewer_id, "viewing the admin overview")?;
        let today = self.today();
        let employees = self.employees.list_employees()?;
        let today_records = self.records_for(today)?;
        let leaves = self.leaves.list_leaves(None)?;
        Ok(admin_overview(today, &employees, &today_records, &leaves))
    }

    /// Adds a new employee to the directory. HR and managers only.
    pub fn add_employee(&self, viewer_id: &str, employee: Employee) -> EngineResult<Employee> {
        let viewer = self.resolve_admin(viewer_id, "adding employees")?;
        if employee.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                message: "id must not be empty".to_string(),
            });
        }
        if employee.full_name.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                message: "full_name must not be empty".to_string(),
            });
        }

        if !self.employees.insert_employee(employee.clone())? {
            return Err(EngineError::EmployeeExists {
                employee_id: employee.id,
            });
        }
        info!(
            viewer_id = %viewer.id,
            employee_id = %employee.id,
            role = ?employee.role,
            "Employee added"
        );
        Ok(employee)
    }

    /// Everyone's records matching `query`. HR and managers only.
    pub fn admin_attendance(
        &self,
        viewer_id: &str,
        query: &AttendanceQuery,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        self.resolve_admin(viewer_id, "viewing attendance records")?;
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(EngineError::InvalidDateRange { start, end });
            }
        }
        self.attendance.query(query)
    }

    /// Approves or rejects a pending leave request.
    pub fn review_leave(
        &self,
        reviewer_id: &str,
        leave_id: u64,
        decision: LeaveDecision,
        comments: &str,
    ) -> EngineResult<LeaveRequest> {
        let reviewer = self.resolve(reviewer_id)?;
        let now = self.clock.now();

        for _ in 0..MAX_SWAP_ATTEMPTS {
            let current = self
                .leaves
                .find_leave(leave_id)?
                .ok_or(EngineError::LeaveNotFound { id: leave_id })?;
            let reviewed = review_leave(&current, &reviewer, decision, comments, now)?;
            if self
                .leaves
                .compare_and_swap_leave(&current, reviewed.clone())?
            {
                info!(
                    reviewer_id = %reviewer.id,
                    leave_id,
                    status = reviewed.status.as_str(),
                    "Leave request reviewed"
                );
                return Ok(reviewed);
            }
            debug!(leave_id, "Leave changed during review, retrying");
        }

        Err(contention("leave request"))
    }

    /// Overrides the status of an existing record. HR and managers only.
    pub fn override_status(
        &self,
        viewer_id: &str,
        employee_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
        notes: Option<&str>,
    ) -> EngineResult<AttendanceRecord> {
        let viewer = self.resolve_admin(viewer_id, "overriding attendance")?;

        for _ in 0..MAX_SWAP_ATTEMPTS {
            let current = self.attendance.find(employee_id, date)?.ok_or_else(|| {
                EngineError::RecordNotFound {
                    employee_id: employee_id.to_string(),
                    date,
                }
            })?;
            let updated = override_status(&self.settings, &current, status, notes)?;
            if self.attendance.compare_and_swap(&current, updated.clone())? {
                info!(
                    viewer_id = %viewer.id,
                    employee_id,
                    %date,
                    status = status.display_name(),
                    "Attendance status overridden"
                );
                return Ok(updated);
            }
            debug!(employee_id, %date, "Record changed during override, retrying");
        }

        Err(contention("attendance record"))
    }

    /// Loads or creates the day's record, applies `evaluate`, and persists.
    ///
    /// When no record exists yet, `evaluate` first runs against a blank one
    /// that is never stored, so a refused attempt creates nothing. Re-reads
    /// and re-evaluates whenever the swap loses to a concurrent writer.
    /// Evaluation errors are returned as-is.
    fn swap_attendance<F>(
        &self,
        employee_id: &str,
        date: NaiveDate,
        evaluate: F,
    ) -> EngineResult<AttendanceRecord>
    where
        F: Fn(&AttendanceRecord) -> EngineResult<AttendanceRecord>,
    {
        if self.attendance.find(employee_id, date)?.is_none() {
            evaluate(&AttendanceRecord::new(employee_id, date)).inspect_err(|err| {
                debug!(employee_id, %date, error = %err, "Attendance action refused");
            })?;
        }

        for attempt in 1..=MAX_SWAP_ATTEMPTS {
            let current = self.attendance.get_or_create(employee_id, date)?;
            let updated = evaluate(&current).inspect_err(|err| {
                debug!(employee_id, %date, error = %err, "Attendance action refused");
            })?;
            if self.attendance.compare_and_swap(&current, updated.clone())? {
                return Ok(updated);
            }
            debug!(employee_id, %date, attempt, "Lost compare-and-swap, re-reading");
        }

        Err(contention("attendance record"))
    }

    fn records_for(&self, date: NaiveDate) -> EngineResult<Vec<AttendanceRecord>> {
        self.attendance.query(&AttendanceQuery {
            start_date: Some(date),
            end_date: Some(date),
            employee_id: None,
        })
    }

    fn resolve(&self, employee_id: &str) -> EngineResult<Employee> {
        self.employees
            .find_employee(employee_id)?
            .ok_or_else(|| EngineError::ProfileNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn resolve_active(&self, employee_id: &str) -> EngineResult<Employee> {
        let employee = self.resolve(employee_id)?;
        if !employee.is_active {
            warn!(employee_id, "Inactive employee attempted an attendance action");
            return Err(EngineError::InactiveEmployee {
                employee_id: employee.id,
            });
        }
        Ok(employee)
    }

    fn resolve_admin(&self, employee_id: &str, action: &str) -> EngineResult<Employee> {
        let employee = self.resolve_active(employee_id)?;
        if !employee.role.is_admin() {
            warn!(employee_id, action, "Non-admin attempted an admin action");
            return Err(EngineError::Forbidden {
                action: action.to_string(),
            });
        }
        Ok(employee)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn contention(what: &str) -> EngineError {
    warn!(what, attempts = MAX_SWAP_ATTEMPTS, "Gave up after repeated write conflicts");
    EngineError::Storage {
        message: format!(
            "{} kept changing; gave up after {} attempts",
            what, MAX_SWAP_ATTEMPTS
        ),
    }
}
