//! Attendance record model.
//!
//! One [`AttendanceRecord`] exists per (employee, calendar date). It moves
//! through a one-way lifecycle: created without timestamps, then checked in,
//! then checked out.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Attendance outcome for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Checked in on time.
    Present,
    /// Checked in after the late threshold.
    Late,
    /// No check-in.
    #[default]
    Absent,
    /// Set by an administrator; never derived.
    HalfDay,
}

impl AttendanceStatus {
    /// Returns true for statuses that count as attending (present or late).
    pub fn is_attending(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }

    /// Returns the display label, e.g. "Half Day".
    pub fn display_name(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::HalfDay => "Half Day",
        }
    }
}

/// Where a record is in its daily lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// No check-in yet.
    Open,
    /// Checked in, not yet checked out.
    CheckedIn,
    /// Checked out; terminal for the day.
    CheckedOut,
}

/// A single employee's attendance for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar date tracked.
    pub date: NaiveDate,
    /// When the employee checked in.
    pub check_in_time: Option<NaiveDateTime>,
    /// When the employee checked out.
    pub check_out_time: Option<NaiveDateTime>,
    /// The day's status.
    pub status: AttendanceStatus,
    /// Hours between check-in and check-out, two decimal places. Present
    /// only once both timestamps are.
    pub work_hours: Option<Decimal>,
    /// Free-text notes, typically from an administrator.
    #[serde(default)]
    pub notes: String,
}

impl AttendanceRecord {
    /// Creates the lazily-initialised record for a day: absent, no timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceRecord, AttendanceStatus, RecordState};
    /// use chrono::NaiveDate;
    ///
    /// let record = AttendanceRecord::new("EMP001", NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
    /// assert_eq!(record.status, AttendanceStatus::Absent);
    /// assert_eq!(record.state(), RecordState::Open);
    /// ```
    pub fn new(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            check_in_time: None,
            check_out_time: None,
            status: AttendanceStatus::Absent,
            work_hours: None,
            notes: String::new(),
        }
    }

    /// Returns the lifecycle state implied by the timestamps.
    pub fn state(&self) -> RecordState {
        match (self.check_in_time, self.check_out_time) {
            (None, _) => RecordState::Open,
            (Some(_), None) => RecordState::CheckedIn,
            (Some(_), Some(_)) => RecordState::CheckedOut,
        }
    }

    /// Returns true if the employee has checked in.
    pub fn is_checked_in(&self) -> bool {
        self.check_in_time.is_some()
    }

    /// Returns true if the employee has checked out.
    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_lifecycle_states() {
        let mut record = AttendanceRecord::new("EMP001", NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        assert_eq!(record.state(), RecordState::Open);

        record.check_in_time = Some(make_datetime("2026-01-13 08:55:00"));
        assert_eq!(record.state(), RecordState::CheckedIn);
        assert!(record.is_checked_in());
        assert!(!record.is_checked_out());

        record.check_out_time = Some(make_datetime("2026-01-13 17:30:00"));
        assert_eq!(record.state(), RecordState::CheckedOut);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(),
            "\"half_day\""
        );
        let status: AttendanceStatus = serde_json::from_str("\"late\"").unwrap();
        assert_eq!(status, AttendanceStatus::Late);
    }

    #[test]
    fn test_attending_statuses() {
        assert!(AttendanceStatus::Present.is_attending());
        assert!(AttendanceStatus::Late.is_attending());
        assert!(!AttendanceStatus::Absent.is_attending());
        assert!(!AttendanceStatus::HalfDay.is_attending());
    }

    #[test]
    fn test_record_round_trips_work_hours_as_string() {
        let mut record = AttendanceRecord::new("EMP001", NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        record.work_hours = Some(Decimal::new(850, 2));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["work_hours"], "8.50");
    }
}
