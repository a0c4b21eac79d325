//! Check-out evaluation.

use chrono::NaiveDateTime;

use crate::config::AttendanceSettings;
use crate::error::CheckOutError;
use crate::models::AttendanceRecord;

use super::calculate_work_hours;

/// Default minimum minutes between check-in and check-out.
pub const DEFAULT_MINIMUM_WORK_MINUTES: u32 = 30;

/// Applies a check-out at `now` to `record`, returning the updated record.
///
/// Preconditions are checked in order:
///
/// 1. The time of day of `now` is inside the check-out window, else
///    [`CheckOutError::OutOfWindow`].
/// 2. The record has a check-in time, else [`CheckOutError::NotCheckedIn`].
/// 3. The record has no check-out time, else [`CheckOutError::AlreadyCheckedOut`].
/// 4. At least `minimum_work_minutes` have elapsed since check-in, else
///    [`CheckOutError::TooSoon`].
///
/// On success the check-out time is set to `now` and work hours are
/// computed. The status fixed at check-in is left unchanged.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::AttendanceSettings;
/// use attendance_engine::evaluation::{perform_check_in, perform_check_out};
/// use attendance_engine::models::AttendanceRecord;
/// use chrono::NaiveDate;
///
/// let settings = AttendanceSettings::default();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let record = AttendanceRecord::new("EMP001", date);
///
/// let record = perform_check_in(&settings, &record, date.and_hms_opt(9, 0, 0).unwrap()).unwrap();
/// let record = perform_check_out(&settings, &record, date.and_hms_opt(17, 30, 0).unwrap()).unwrap();
/// assert_eq!(record.work_hours.unwrap().to_string(), "8.50");
/// ```
pub fn perform_check_out(
    settings: &AttendanceSettings,
    record: &AttendanceRecord,
    now: NaiveDateTime,
) -> Result<AttendanceRecord, CheckOutError> {
    if !settings.check_out_window.contains(now.time()) {
        return Err(CheckOutError::OutOfWindow {
            at: now.time(),
            window: settings.check_out_window,
        });
    }

    let check_in = record.check_in_time.ok_or(CheckOutError::NotCheckedIn)?;

    if record.check_out_time.is_some() {
        return Err(CheckOutError::AlreadyCheckedOut);
    }

    let elapsed = now - check_in;
    if elapsed.num_seconds() < i64::from(settings.minimum_work_minutes) * 60 {
        return Err(CheckOutError::TooSoon {
            elapsed_minutes: elapsed.num_minutes(),
            minimum_minutes: settings.minimum_work_minutes,
        });
    }

    let mut updated = record.clone();
    updated.check_out_time = Some(now);
    updated.work_hours = Some(calculate_work_hours(check_in, now));
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeWindow;
    use crate::models::{AttendanceStatus, RecordState};
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 13)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn settings() -> AttendanceSettings {
        AttendanceSettings {
            check_out_window: TimeWindow::new(t(17, 0), t(18, 0)),
            minimum_work_minutes: DEFAULT_MINIMUM_WORK_MINUTES,
            ..AttendanceSettings::default()
        }
    }

    fn checked_in_at(h: u32, m: u32, status: AttendanceStatus) -> AttendanceRecord {
        let mut record = AttendanceRecord::new("EMP001", at(0, 0).date());
        record.check_in_time = Some(at(h, m));
        record.status = status;
        record
    }

    #[test]
    fn test_full_day_work_hours() {
        let record = checked_in_at(9, 0, AttendanceStatus::Present);
        let updated = perform_check_out(&settings(), &record, at(17, 30)).unwrap();
        assert_eq!(updated.check_out_time, Some(at(17, 30)));
        assert_eq!(updated.work_hours, Some(Decimal::from_str("8.50").unwrap()));
        assert_eq!(updated.state(), RecordState::CheckedOut);
    }

    #[test]
    fn test_status_unchanged_by_check_out() {
        let record = checked_in_at(9, 40, AttendanceStatus::Late);
        let updated = perform_check_out(&settings(), &record, at(17, 45)).unwrap();
        assert_eq!(updated.status, AttendanceStatus::Late);
    }

    #[test]
    fn test_out_of_window_regardless_of_elapsed() {
        let record = checked_in_at(8, 0, AttendanceStatus::Present);
        let result = perform_check_out(&settings(), &record, at(8, 10));
        assert!(matches!(result, Err(CheckOutError::OutOfWindow { .. })));
    }

    #[test]
    fn test_too_soon_inside_window() {
        let record = checked_in_at(17, 0, AttendanceStatus::Late);
        let result = perform_check_out(&settings(), &record, at(17, 5));
        assert_eq!(
            result,
            Err(CheckOutError::TooSoon {
                elapsed_minutes: 5,
                minimum_minutes: 30,
            })
        );
    }

    #[test]
    fn test_exactly_minimum_is_allowed() {
        let record = checked_in_at(17, 0, AttendanceStatus::Late);
        let updated = perform_check_out(&settings(), &record, at(17, 30)).unwrap();
        assert_eq!(updated.work_hours, Some(Decimal::from_str("0.50").unwrap()));
    }

    #[test]
    fn test_not_checked_in() {
        let record = AttendanceRecord::new("EMP001", at(0, 0).date());
        let result = perform_check_out(&settings(), &record, at(17, 30));
        assert_eq!(result, Err(CheckOutError::NotCheckedIn));
    }

    #[test]
    fn test_already_checked_out() {
        let record = checked_in_at(9, 0, AttendanceStatus::Present);
        let first = perform_check_out(&settings(), &record, at(17, 30)).unwrap();
        let second = perform_check_out(&settings(), &first, at(17, 45));
        assert_eq!(second, Err(CheckOutError::AlreadyCheckedOut));
    }

    #[test]
    fn test_clock_moved_backwards_is_too_soon() {
        let mut record = checked_in_at(9, 0, AttendanceStatus::Present);
        record.check_in_time = Some(at(17, 50));
        let result = perform_check_out(&settings(), &record, at(17, 20));
        assert!(matches!(
            result,
            Err(CheckOutError::TooSoon { elapsed_minutes: -30, .. })
        ));
    }
}
