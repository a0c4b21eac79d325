//! Attendance evaluation rules.
//!
//! Pure functions over an [`AttendanceRecord`](crate::models::AttendanceRecord),
//! the [`AttendanceSettings`](crate::config::AttendanceSettings) and an
//! explicit `now`. Nothing in this module reads a clock, touches storage or
//! logs; callers supply every input and persist every output.
//!
//! A record moves one way through `Open -> CheckedIn -> CheckedOut`, each
//! step guarded by [`perform_check_in`] / [`perform_check_out`].

mod check_in;
mod check_out;
mod status;
mod window;
mod work_hours;

pub use check_in::perform_check_in;
pub use check_out::{DEFAULT_MINIMUM_WORK_MINUTES, perform_check_out};
pub use status::{derive_status, override_status};
pub use window::{can_check_in, can_check_out};
pub use work_hours::calculate_work_hours;

#[cfg(test)]
mod properties {
    use super::*;
    use crate::config::AttendanceSettings;
    use crate::error::CheckInError;
    use crate::models::AttendanceRecord;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 13).unwrap()
    }

    fn at_second(second_of_day: u32) -> NaiveDateTime {
        day().and_hms_opt(0, 0, 0).unwrap() + Duration::seconds(i64::from(second_of_day))
    }

    proptest! {
        #[test]
        fn work_hours_defined_iff_both_timestamps(
            check_in_second in 7u32 * 3600..=11 * 3600,
            check_out_second in 15u32 * 3600..=20 * 3600,
        ) {
            let settings = AttendanceSettings::default();
            let record = AttendanceRecord::new("EMP001", day());

            let checked_in = perform_check_in(&settings, &record, at_second(check_in_second)).unwrap();
            prop_assert!(checked_in.work_hours.is_none());

            let checked_out = perform_check_out(&settings, &checked_in, at_second(check_out_second)).unwrap();
            let expected = calculate_work_hours(at_second(check_in_second), at_second(check_out_second));
            prop_assert_eq!(checked_out.work_hours, Some(expected));
            prop_assert_eq!(expected.scale(), 2);
        }

        #[test]
        fn work_hours_within_half_hundredth_of_exact(seconds in 0i64..=48 * 3600) {
            let start = at_second(0);
            let hours = calculate_work_hours(start, start + Duration::seconds(seconds));
            let exact = rust_decimal::Decimal::from(seconds) / rust_decimal::Decimal::from(3600);
            let diff = (hours - exact).abs();
            prop_assert!(diff <= rust_decimal::Decimal::new(5, 3));
        }

        #[test]
        fn check_in_twice_equals_check_in_once(first in 0u32..86_400, second in 0u32..86_400) {
            let settings = AttendanceSettings::default();
            let record = AttendanceRecord::new("EMP001", day());

            if let Ok(once) = perform_check_in(&settings, &record, at_second(first)) {
                let twice = perform_check_in(&settings, &once, at_second(second));
                if settings.check_in_window.contains(at_second(second).time()) {
                    prop_assert_eq!(twice, Err(CheckInError::AlreadyCheckedIn));
                } else {
                    let out_of_window = matches!(twice, Err(CheckInError::OutOfWindow { .. }));
                    prop_assert!(out_of_window);
                }
            }
        }

        #[test]
        fn can_predicates_are_stable(now in 0u32..86_400, checked_in in proptest::bool::ANY) {
            let settings = AttendanceSettings::default();
            let mut record = AttendanceRecord::new("EMP001", day());
            if checked_in {
                record.check_in_time = Some(at_second(8 * 3600));
            }
            let snapshot = record.clone();
            let now = at_second(now);

            let first = (can_check_in(&settings, &record, now), can_check_out(&settings, &record, now));
            for _ in 0..3 {
                prop_assert_eq!(
                    (can_check_in(&settings, &record, now), can_check_out(&settings, &record, now)),
                    first
                );
            }
            prop_assert_eq!(record, snapshot);
        }

        #[test]
        fn can_check_in_agrees_with_perform(now in 0u32..86_400) {
            let settings = AttendanceSettings::default();
            let record = AttendanceRecord::new("EMP001", day());
            let now = at_second(now);
            prop_assert_eq!(
                can_check_in(&settings, &record, now),
                perform_check_in(&settings, &record, now).is_ok()
            );
        }
    }
}
