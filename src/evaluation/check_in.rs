//! Check-in evaluation.

use chrono::NaiveDateTime;

use crate::config::AttendanceSettings;
use crate::error::CheckInError;
use crate::models::AttendanceRecord;

use super::derive_status;

/// Applies a check-in at `now` to `record`, returning the updated record.
///
/// Preconditions are checked in order:
///
/// 1. The time of day of `now` is inside the check-in window, else
///    [`CheckInError::OutOfWindow`].
/// 2. The record has no check-in time, else [`CheckInError::AlreadyCheckedIn`].
///
/// On success the check-in time is set to `now` and the status is derived
/// from it (`Late` past the late threshold, otherwise `Present`). The input
/// record is never modified, so a refused call leaves no trace and a second
/// call after a success always reports `AlreadyCheckedIn`.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::AttendanceSettings;
/// use attendance_engine::error::CheckInError;
/// use attendance_engine::evaluation::perform_check_in;
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
///
/// let settings = AttendanceSettings::default();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let record = AttendanceRecord::new("EMP001", date);
///
/// let checked_in = perform_check_in(&settings, &record, date.and_hms_opt(8, 55, 0).unwrap()).unwrap();
/// assert_eq!(checked_in.status, AttendanceStatus::Present);
///
/// let again = perform_check_in(&settings, &checked_in, date.and_hms_opt(9, 5, 0).unwrap());
/// assert_eq!(again, Err(CheckInError::AlreadyCheckedIn));
/// ```
pub fn perform_check_in(
    settings: &AttendanceSettings,
    record: &AttendanceRecord,
    now: NaiveDateTime,
) -> Result<AttendanceRecord, CheckInError> {
    if !settings.check_in_window.contains(now.time()) {
        return Err(CheckInError::OutOfWindow {
            at: now.time(),
            window: settings.check_in_window,
        });
    }

    if record.check_in_time.is_some() {
        return Err(CheckInError::AlreadyCheckedIn);
    }

    let mut updated = record.clone();
    updated.check_in_time = Some(now);
    updated.status = derive_status(&updated, settings);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeWindow;
    use crate::models::{AttendanceStatus, RecordState};
    use chrono::{NaiveDate, NaiveTime};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 13)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn narrow_settings() -> AttendanceSettings {
        AttendanceSettings {
            standard_check_in_time: t(9, 0),
            late_threshold_minutes: 15,
            check_in_window: TimeWindow::new(t(8, 0), t(9, 0)),
            ..AttendanceSettings::default()
        }
    }

    fn open_record() -> AttendanceRecord {
        AttendanceRecord::new("EMP001", NaiveDate::from_ymd_opt(2026, 1, 13).unwrap())
    }

    #[test]
    fn test_on_time_check_in_is_present() {
        let updated = perform_check_in(&narrow_settings(), &open_record(), at(8, 55)).unwrap();
        assert_eq!(updated.check_in_time, Some(at(8, 55)));
        assert_eq!(updated.status, AttendanceStatus::Present);
        assert_eq!(updated.state(), RecordState::CheckedIn);
        assert_eq!(updated.work_hours, None);
    }

    #[test]
    fn test_late_check_in_within_wide_window() {
        let settings = AttendanceSettings {
            check_in_window: TimeWindow::new(t(8, 0), t(11, 0)),
            ..narrow_settings()
        };
        let updated = perform_check_in(&settings, &open_record(), at(9, 20)).unwrap();
        assert_eq!(updated.status, AttendanceStatus::Late);
    }

    #[test]
    fn test_outside_window_is_refused() {
        let result = perform_check_in(&narrow_settings(), &open_record(), at(9, 20));
        assert_eq!(
            result,
            Err(CheckInError::OutOfWindow {
                at: t(9, 20),
                window: TimeWindow::new(t(8, 0), t(9, 0)),
            })
        );
    }

    #[test]
    fn test_window_checked_before_duplicate() {
        let mut record = open_record();
        record.check_in_time = Some(at(8, 10));
        let result = perform_check_in(&narrow_settings(), &record, at(10, 0));
        assert!(matches!(result, Err(CheckInError::OutOfWindow { .. })));
    }

    #[test]
    fn test_second_check_in_never_overwrites() {
        let settings = narrow_settings();
        let first = perform_check_in(&settings, &open_record(), at(8, 15)).unwrap();
        let second = perform_check_in(&settings, &first, at(8, 45));
        assert_eq!(second, Err(CheckInError::AlreadyCheckedIn));
        assert_eq!(first.check_in_time, Some(at(8, 15)));
    }

    #[test]
    fn test_notes_preserved() {
        let mut record = open_record();
        record.notes = "Remote today".to_string();
        let updated = perform_check_in(&narrow_settings(), &record, at(8, 30)).unwrap();
        assert_eq!(updated.notes, "Remote today");
    }
}
