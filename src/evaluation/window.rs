//! Time-window gating.
//!
//! Window checks compare local wall-clock time of day only; the date part of
//! `now` is ignored.

use chrono::NaiveDateTime;

use crate::config::AttendanceSettings;
use crate::models::AttendanceRecord;

/// Returns true if a check-in would be accepted right now.
///
/// True iff the time of day of `now` is inside the check-in window and the
/// record has no check-in time yet. Has no side effects.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::AttendanceSettings;
/// use attendance_engine::evaluation::can_check_in;
/// use attendance_engine::models::AttendanceRecord;
/// use chrono::NaiveDate;
///
/// let settings = AttendanceSettings::default(); // window 07:00-11:00
/// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let record = AttendanceRecord::new("EMP001", date);
///
/// assert!(can_check_in(&settings, &record, date.and_hms_opt(8, 30, 0).unwrap()));
/// assert!(!can_check_in(&settings, &record, date.and_hms_opt(12, 0, 0).unwrap()));
/// ```
pub fn can_check_in(
    settings: &AttendanceSettings,
    record: &AttendanceRecord,
    now: NaiveDateTime,
) -> bool {
    settings.check_in_window.contains(now.time()) && record.check_in_time.is_none()
}

/// Returns true if a check-out would pass the window and lifecycle checks.
///
/// True iff the time of day of `now` is inside the check-out window, the
/// record has a check-in time and no check-out time. The minimum work
/// duration is not part of this check.
pub fn can_check_out(
    settings: &AttendanceSettings,
    record: &AttendanceRecord,
    now: NaiveDateTime,
) -> bool {
    settings.check_out_window.contains(now.time())
        && record.check_in_time.is_some()
        && record.check_out_time.is_none()
}
