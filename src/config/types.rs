//! Configuration types for attendance evaluation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{Duration, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::evaluation::DEFAULT_MINIMUM_WORK_MINUTES;
use crate::models::Employee;

/// An inclusive time-of-day range, `[start, end]`.
///
/// # Example
///
/// ```
/// use attendance_engine::config::TimeWindow;
/// use chrono::NaiveTime;
///
/// let window = TimeWindow::new(
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
/// );
/// assert!(window.contains(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
/// assert!(!window.contains(NaiveTime::from_hms_opt(9, 0, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First permitted time of day.
    pub start: NaiveTime,
    /// Last permitted time of day.
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Creates a window from its bounds.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Returns true if `time` falls within the window, bounds included.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }

    /// Returns a user-facing description, e.g. "Check-in allowed between 08:00 and 09:00".
    pub fn describe(&self, action: &str) -> String {
        format!(
            "{} allowed between {} and {}",
            action,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Process-wide attendance rules.
///
/// Read-only at evaluation time; every evaluator operation takes the
/// settings as an argument. Missing keys in `settings.yaml` fall back to
/// [`AttendanceSettings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceSettings {
    /// The time employees are expected to arrive.
    pub standard_check_in_time: NaiveTime,
    /// The time employees are expected to leave.
    pub standard_check_out_time: NaiveTime,
    /// Grace period after the standard check-in time before an arrival is late.
    pub late_threshold_minutes: u32,
    /// Minimum time between check-in and check-out.
    pub minimum_work_minutes: u32,
    /// When check-in is permitted.
    pub check_in_window: TimeWindow,
    /// When check-out is permitted.
    pub check_out_window: TimeWindow,
    /// Expected hours in a working day.
    pub standard_work_hours: Decimal,
    /// Daily hours beyond which time counts as overtime in summaries.
    pub overtime_threshold_hours: Decimal,
}

impl Default for AttendanceSettings {
    fn default() -> Self {
        Self {
            standard_check_in_time: hm(9, 0),
            standard_check_out_time: hm(17, 0),
            late_threshold_minutes: 15,
            minimum_work_minutes: DEFAULT_MINIMUM_WORK_MINUTES,
            check_in_window: TimeWindow::new(hm(7, 0), hm(11, 0)),
            check_out_window: TimeWindow::new(hm(15, 0), hm(20, 0)),
            standard_work_hours: Decimal::new(800, 2),
            overtime_threshold_hours: Decimal::new(800, 2),
        }
    }
}

impl AttendanceSettings {
    /// The latest check-in time that still counts as on time.
    ///
    /// Saturates at the end of the day rather than wrapping past midnight.
    pub fn late_cutoff(&self) -> NaiveTime {
        let (cutoff, wrapped) = self
            .standard_check_in_time
            .overflowing_add_signed(Duration::minutes(i64::from(self.late_threshold_minutes)));
        if wrapped != 0 {
            NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(cutoff)
        } else {
            cutoff
        }
    }

    /// Checks that the settings are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSettings`] naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.check_in_window.start > self.check_in_window.end {
            return Err(invalid(
                "check_in_window",
                "start must not be after end",
            ));
        }
        if self.check_out_window.start > self.check_out_window.end {
            return Err(invalid(
                "check_out_window",
                "start must not be after end",
            ));
        }
        if self.standard_work_hours <= Decimal::ZERO || self.standard_work_hours > Decimal::from(24) {
            return Err(invalid(
                "standard_work_hours",
                "must be greater than 0 and at most 24",
            ));
        }
        if self.overtime_threshold_hours < Decimal::ZERO {
            return Err(invalid("overtime_threshold_hours", "must not be negative"));
        }
        if self.minimum_work_minutes > 24 * 60 {
            return Err(invalid("minimum_work_minutes", "must be at most one day"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidSettings {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Employee roster file structure (`employees.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRoster {
    /// Employees to seed the directory with.
    #[serde(default)]
    pub employees: Vec<Employee>,
}
