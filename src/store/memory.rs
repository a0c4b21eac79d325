//! In-process store backed by mutex-guarded maps.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, RwLock};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{EngineError, EngineResult};
use crate::leave::check_overlap;
use crate::models::{AttendanceRecord, Employee, LeaveRequest, LeaveStatus, NewLeaveRequest};

use super::{AttendanceQuery, AttendanceStore, EmployeeDirectory, LeaveStore};

type RecordKey = (String, NaiveDate);

#[derive(Debug, Default)]
struct LeaveTable {
    last_id: u64,
    rows: BTreeMap<u64, LeaveRequest>,
}

/// A store holding everything in memory.
///
/// Each table sits behind its own lock; every trait method holds the lock
/// for its whole read-check-write, which is what makes
/// [`AttendanceStore::get_or_create`] and the compare-and-swap methods
/// atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: RwLock<BTreeMap<String, Employee>>,
    attendance: Mutex<HashMap<RecordKey, AttendanceRecord>>,
    leaves: Mutex<LeaveTable>,
}

fn poisoned(table: &str) -> EngineError {
    EngineError::Storage {
        message: format!("{} table lock poisoned", table),
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose directory holds `employees`.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let directory = employees
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();
        Self {
            employees: RwLock::new(directory),
            ..Self::default()
        }
    }

    fn attendance(&self) -> EngineResult<MutexGuard<'_, HashMap<RecordKey, AttendanceRecord>>> {
        self.attendance.lock().map_err(|_| poisoned("attendance"))
    }

    fn leaves(&self) -> EngineResult<MutexGuard<'_, LeaveTable>> {
        self.leaves.lock().map_err(|_| poisoned("leave"))
    }
}

impl EmployeeDirectory for MemoryStore {
    fn find_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        let employees = self.employees.read().map_err(|_| poisoned("employee"))?;
        Ok(employees.get(employee_id).cloned())
    }

    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        let employees = self.employees.read().map_err(|_| poisoned("employee"))?;
        Ok(employees.values().cloned().collect())
    }

    fn insert_employee(&self, employee: Employee) -> EngineResult<bool> {
        let mut employees = self.employees.write().map_err(|_| poisoned("employee"))?;
        match employees.entry(employee.id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(employee);
                Ok(true)
            }
        }
    }
}

impl AttendanceStore for MemoryStore {
    fn get_or_create(&self, employee_id: &str, date: NaiveDate) -> EngineResult<AttendanceRecord> {
        let mut records = self.attendance()?;
        let record = records
            .entry((employee_id.to_string(), date))
            .or_insert_with(|| AttendanceRecord::new(employee_id, date));
        Ok(record.clone())
    }

    fn find(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>> {
        let records = self.attendance()?;
        Ok(records.get(&(employee_id.to_string(), date)).cloned())
    }

    fn compare_and_swap(
        &self,
        expected: &AttendanceRecord,
        replacement: AttendanceRecord,
    ) -> EngineResult<bool> {
        if (expected.employee_id.as_str(), expected.date)
            != (replacement.employee_id.as_str(), replacement.date)
        {
            return Err(EngineError::Storage {
                message: "compare_and_swap cannot change a record's key".to_string(),
            });
        }

        let mut records = self.attendance()?;
        match records.get_mut(&(expected.employee_id.clone(), expected.date)) {
            Some(current) if current == expected => {
                *current = replacement;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn query(&self, query: &AttendanceQuery) -> EngineResult<Vec<AttendanceRecord>> {
        let records = self.attendance()?;
        let mut matching: Vec<AttendanceRecord> = records
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        Ok(matching)
    }
}

impl LeaveStore for MemoryStore {
    fn insert_leave(
        &self,
        employee_id: &str,
        request: NewLeaveRequest,
        applied_at: NaiveDateTime,
    ) -> EngineResult<LeaveRequest> {
        let mut table = self.leaves()?;
        let existing: Vec<LeaveRequest> = table
            .rows
            .values()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect();
        check_overlap(employee_id, &request, &existing)?;

        table.last_id += 1;
        let leave = LeaveRequest {
            id: table.last_id,
            employee_id: employee_id.to_string(),
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason,
            status: LeaveStatus::Pending,
            applied_at,
            reviewed_by: None,
            reviewed_at: None,
            admin_comments: String::new(),
        };
        table.rows.insert(leave.id, leave.clone());
        Ok(leave)
    }

    fn find_leave(&self, id: u64) -> EngineResult<Option<LeaveRequest>> {
        Ok(self.leaves()?.rows.get(&id).cloned())
    }

    fn list_leaves(&self, employee_id: Option<&str>) -> EngineResult<Vec<LeaveRequest>> {
        let table = self.leaves()?;
        let mut leaves: Vec<LeaveRequest> = table
            .rows
            .values()
            .filter(|l| employee_id.is_none_or(|id| l.employee_id == id))
            .cloned()
            .collect();
        leaves.sort_by(|a, b| b.applied_at.cmp(&a.applied_at).then_with(|| b.id.cmp(&a.id)));
        Ok(leaves)
    }

    fn compare_and_swap_leave(
        &self,
        expected: &LeaveRequest,
        replacement: LeaveRequest,
    ) -> EngineResult<bool> {
        if expected.id != replacement.id {
            return Err(EngineError::Storage {
                message: "compare_and_swap_leave cannot change a request's id".to_string(),
            });
        }

        let mut table = self.leaves()?;
        match table.rows.get_mut(&expected.id) {
            Some(current) if current == expected => {
                *current = replacement;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
