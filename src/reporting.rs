//! Attendance reporting.
//!
//! Summaries over a date range, role-based dashboards and the administrative
//! overview. All functions work on slices the caller has already fetched.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::AttendanceSettings;
use crate::models::{
    AdminOverview, AttendanceRecord, AttendanceStatus, AttendanceSummary, Dashboard, Employee,
    EmployeeProfile, LeaveRequest, LeaveStatus, Role,
};

/// Summarizes the records falling within `[start, end]`.
///
/// Records outside the range are ignored. Overtime is counted per day as
/// the hours above `settings.overtime_threshold_hours`.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::AttendanceSettings;
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus};
/// use attendance_engine::reporting::summarize_attendance;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let mut record = AttendanceRecord::new("EMP001", day);
/// record.status = AttendanceStatus::Late;
/// record.work_hours = Some(Decimal::new(950, 2));
///
/// let summary = summarize_attendance(&[record], day, day, &AttendanceSettings::default());
/// assert_eq!(summary.present_days, 1);
/// assert_eq!(summary.late_days, 1);
/// assert_eq!(summary.overtime_hours, Decimal::new(150, 2));
/// ```
pub fn summarize_attendance(
    records: &[AttendanceRecord],
    start: NaiveDate,
    end: NaiveDate,
    settings: &AttendanceSettings,
) -> AttendanceSummary {
    let mut summary = AttendanceSummary {
        start_date: start,
        end_date: end,
        total_days: ((end - start).num_days() + 1).max(0),
        present_days: 0,
        late_days: 0,
        absent_days: 0,
        half_days: 0,
        total_work_hours: Decimal::new(0, 2),
        overtime_hours: Decimal::new(0, 2),
    };

    for record in records.iter().filter(|r| start <= r.date && r.date <= end) {
        match record.status {
            AttendanceStatus::Present => summary.present_days += 1,
            AttendanceStatus::Late => {
                summary.present_days += 1;
                summary.late_days += 1;
            }
            AttendanceStatus::Absent => summary.absent_days += 1,
            AttendanceStatus::HalfDay => summary.half_days += 1,
        }

        if let Some(hours) = record.work_hours {
            summary.total_work_hours += hours;
            if hours > settings.overtime_threshold_hours {
                summary.overtime_hours += hours - settings.overtime_threshold_hours;
            }
        }
    }

    summary
}

/// Builds the dashboard for `viewer` from the roster and today's records.
pub fn build_dashboard(
    viewer: &Employee,
    employees: &[Employee],
    today_records: &[AttendanceRecord],
) -> Dashboard {
    let own_record = today_records
        .iter()
        .find(|r| r.employee_id == viewer.id)
        .cloned();
    let present_count = today_records
        .iter()
        .filter(|r| r.status.is_attending())
        .count();
    let late_count = today_records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Late)
        .count();

    match viewer.role {
        Role::Manager => Dashboard::Manager {
            total_employees: employees.len(),
            staff_count: employees.iter().filter(|e| e.role == Role::Staff).count(),
            hr_count: employees.iter().filter(|e| e.role == Role::Hr).count(),
            present_count,
            late_count,
            own_record,
        },
        Role::Hr => {
            let mut department_counts = BTreeMap::new();
            for employee in employees {
                *department_counts.entry(employee.department).or_insert(0) += 1;
            }
            Dashboard::Hr {
                total_employees: employees.len(),
                active_employees: employees.iter().filter(|e| e.is_active).count(),
                department_counts,
                present_count,
                late_count,
                absent_count: employees.len().saturating_sub(present_count),
                own_record,
            }
        }
        Role::Staff => {
            let mut colleagues: Vec<Employee> = employees
                .iter()
                .filter(|e| e.department == viewer.department && e.id != viewer.id)
                .cloned()
                .collect();
            colleagues.sort_by(|a, b| a.id.cmp(&b.id));
            Dashboard::Staff {
                department: viewer.department,
                department_name: viewer.department.display_name().to_string(),
                colleagues,
                own_record,
            }
        }
    }
}

/// Builds the organisation-wide overview for `date`.
pub fn admin_overview(
    date: NaiveDate,
    employees: &[Employee],
    today_records: &[AttendanceRecord],
    leaves: &[LeaveRequest],
) -> AdminOverview {
    AdminOverview {
        date,
        active_employees: employees.iter().filter(|e| e.is_active).count(),
        present_today: today_records
            .iter()
            .filter(|r| r.date == date && r.status.is_attending())
            .count(),
        pending_leaves: leaves
            .iter()
            .filter(|l| l.status == LeaveStatus::Pending)
            .count(),
        on_leave_today: leaves.iter().filter(|l| l.covers(date)).count(),
    }
}

/// Builds `employee`'s profile as of `today`.
///
/// Attendance figures cover the first of `today`'s month through `today`;
/// `records` may hold more and is filtered here. Leave days count the
/// employee's approved requests starting in `today`'s year.
pub fn employee_profile(
    employee: &Employee,
    today: NaiveDate,
    records: &[AttendanceRecord],
    leaves: &[LeaveRequest],
    settings: &AttendanceSettings,
) -> EmployeeProfile {
    let month_start = today.with_day(1).unwrap_or(today);
    let own: Vec<AttendanceRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee.id)
        .cloned()
        .collect();
    let month = summarize_attendance(&own, month_start, today, settings);

    EmployeeProfile {
        employee: employee.clone(),
        years_of_service: employee.years_of_service(today),
        month_name: month_start.format("%B %Y").to_string(),
        present_days: month.present_days,
        late_days: month.late_days,
        total_work_hours: month.total_work_hours,
        approved_leave_days: leaves
            .iter()
            .filter(|l| {
                l.employee_id == employee.id
                    && l.status == LeaveStatus::Approved
                    && l.start_date.year() == today.year()
            })
            .map(LeaveRequest::duration_days)
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, LeaveType};
    use std::str::FromStr;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str, department: Department, role: Role) -> Employee {
        Employee {
            id: id.to_string(),
            full_name: id.to_string(),
            department,
            role,
            position: String::new(),
            hire_date: date(1),
            is_active: true,
        }
    }

    fn record(id: &str, day: u32, status: AttendanceStatus, hours: Option<&str>) -> AttendanceRecord {
        let mut record = AttendanceRecord::new(id, date(day));
        record.status = status;
        record.work_hours = hours.map(dec);
        record
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee("MGR001", Department::Operations, Role::Manager),
            employee("HR001", Department::Hr, Role::Hr),
            employee("EMP001", Department::It, Role::Staff),
            employee("EMP002", Department::It, Role::Staff),
            employee("EMP003", Department::Finance, Role::Staff),
        ]
    }

    #[test]
    fn test_summary_counts_and_hours() {
        let records = vec![
            record("EMP001", 12, AttendanceStatus::Present, Some("8.00")),
            record("EMP001", 13, AttendanceStatus::Late, Some("9.25")),
            record("EMP001", 14, AttendanceStatus::Absent, None),
            record("EMP001", 15, AttendanceStatus::HalfDay, Some("4.00")),
            record("EMP001", 20, AttendanceStatus::Present, Some("8.00")),
        ];
        let summary = summarize_attendance(&records, date(12), date(16), &AttendanceSettings::default());

        assert_eq!(summary.total_days, 5);
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.late_days, 1);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.half_days, 1);
        assert_eq!(summary.total_work_hours, dec("21.25"));
        assert_eq!(summary.overtime_hours, dec("1.25"));
    }

    #[test]
    fn test_summary_of_inverted_range_is_empty() {
        let records = vec![record("EMP001", 12, AttendanceStatus::Present, Some("8.00"))];
        let summary = summarize_attendance(&records, date(16), date(12), &AttendanceSettings::default());
        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.present_days, 0);
    }

    #[test]
    fn test_manager_dashboard_counts() {
        let employees = roster();
        let today = vec![
            record("MGR001", 13, AttendanceStatus::Present, None),
            record("EMP001", 13, AttendanceStatus::Late, None),
            record("EMP002", 13, AttendanceStatus::Absent, None),
        ];
        match build_dashboard(&employees[0], &employees, &today) {
            Dashboard::Manager {
                total_employees,
                staff_count,
                hr_count,
                present_count,
                late_count,
                own_record,
            } => {
                assert_eq!(total_employees, 5);
                assert_eq!(staff_count, 3);
                assert_eq!(hr_count, 1);
                assert_eq!(present_count, 2);
                assert_eq!(late_count, 1);
                assert_eq!(own_record.map(|r| r.status), Some(AttendanceStatus::Present));
            }
            other => panic!("expected manager dashboard, got {:?}", other),
        }
    }

    #[test]
    fn test_hr_dashboard_department_counts() {
        let employees = roster();
        let today = vec![record("EMP003", 13, AttendanceStatus::Present, None)];
        match build_dashboard(&employees[1], &employees, &today) {
            Dashboard::Hr {
                department_counts,
                absent_count,
                own_record,
                ..
            } => {
                assert_eq!(department_counts.get(&Department::It), Some(&2));
                assert_eq!(department_counts.get(&Department::Marketing), None);
                assert_eq!(absent_count, 4);
                assert!(own_record.is_none());
            }
            other => panic!("expected hr dashboard, got {:?}", other),
        }
    }

    #[test]
    fn test_staff_dashboard_lists_colleagues_only() {
        let employees = roster();
        match build_dashboard(&employees[2], &employees, &[]) {
            Dashboard::Staff {
                department_name,
                colleagues,
                ..
            } => {
                assert_eq!(department_name, "Information Technology");
                let ids: Vec<&str> = colleagues.iter().map(|e| e.id.as_str()).collect();
                assert_eq!(ids, vec!["EMP002"]);
            }
            other => panic!("expected staff dashboard, got {:?}", other),
        }
    }

    #[test]
    fn test_profile_covers_current_month() {
        let mut employee = employee("EMP001", Department::It, Role::Staff);
        employee.hire_date = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let mut december = record("EMP001", 1, AttendanceStatus::Present, Some("8.00"));
        december.date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let records = vec![
            december,
            record("EMP001", 12, AttendanceStatus::Present, Some("8.00")),
            record("EMP001", 13, AttendanceStatus::Late, Some("7.50")),
            record("EMP002", 13, AttendanceStatus::Present, Some("8.00")),
        ];
        let leave = |id: u64, status: LeaveStatus, start: NaiveDate, end: NaiveDate| LeaveRequest {
            id,
            employee_id: "EMP001".to_string(),
            leave_type: LeaveType::Vacation,
            start_date: start,
            end_date: end,
            reason: "Trip".to_string(),
            status,
            applied_at: date(2).and_hms_opt(9, 0, 0).unwrap(),
            reviewed_by: None,
            reviewed_at: None,
            admin_comments: String::new(),
        };
        let leaves = vec![
            leave(1, LeaveStatus::Approved, date(20), date(22)),
            leave(2, LeaveStatus::Pending, date(26), date(26)),
            leave(3, LeaveStatus::Approved, NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(), NaiveDate::from_ymd_opt(2025, 8, 8).unwrap()),
        ];

        let profile = employee_profile(&employee, date(13), &records, &leaves, &AttendanceSettings::default());
        assert_eq!(profile.years_of_service, 4);
        assert_eq!(profile.month_name, "January 2026");
        assert_eq!(profile.present_days, 2);
        assert_eq!(profile.late_days, 1);
        assert_eq!(profile.total_work_hours, dec("15.50"));
        assert_eq!(profile.approved_leave_days, 3);
    }

    #[test]
    fn test_admin_overview() {
        let mut employees = roster();
        employees[4].is_active = false;
        let today = vec![
            record("EMP001", 13, AttendanceStatus::Present, None),
            record("EMP002", 13, AttendanceStatus::Late, None),
        ];
        let leave = |id: u64, status: LeaveStatus, start: u32, end: u32| LeaveRequest {
            id,
            employee_id: "EMP003".to_string(),
            leave_type: LeaveType::Sick,
            start_date: date(start),
            end_date: date(end),
            reason: "Flu".to_string(),
            status,
            applied_at: date(10).and_hms_opt(9, 0, 0).unwrap(),
            reviewed_by: None,
            reviewed_at: None,
            admin_comments: String::new(),
        };
        let leaves = vec![
            leave(1, LeaveStatus::Pending, 20, 21),
            leave(2, LeaveStatus::Approved, 12, 14),
            leave(3, LeaveStatus::Rejected, 13, 13),
        ];

        let overview = admin_overview(date(13), &employees, &today, &leaves);
        assert_eq!(overview.active_employees, 4);
        assert_eq!(overview.present_today, 2);
        assert_eq!(overview.pending_leaves, 1);
        assert_eq!(overview.on_leave_today, 1);
    }
}
