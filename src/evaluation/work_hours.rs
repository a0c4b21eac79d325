//! Work-hour calculation.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Hours between two timestamps, rounded half-up to two decimal places.
///
/// Uses full timestamp subtraction in whole seconds, so a shift that
/// crosses midnight is measured correctly. The result always carries two
/// decimal places (`8.50`, not `8.5`).
///
/// # Examples
///
/// ```
/// use attendance_engine::evaluation::calculate_work_hours;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let hours = calculate_work_hours(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(17, 30, 0).unwrap(),
/// );
/// assert_eq!(hours.to_string(), "8.50");
/// ```
pub fn calculate_work_hours(check_in: NaiveDateTime, check_out: NaiveDateTime) -> Decimal {
    let seconds = (check_out - check_in).num_seconds();
    let mut hours = (Decimal::from(seconds) / SECONDS_PER_HOUR)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    hours.rescale(2);
    hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::str::FromStr;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 13)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_eight_and_a_half_hours() {
        assert_eq!(calculate_work_hours(at(9, 0, 0), at(17, 30, 0)), dec("8.50"));
    }

    #[test]
    fn test_rounds_half_up() {
        // 18 seconds = 0.005 hours exactly
        assert_eq!(calculate_work_hours(at(9, 0, 0), at(9, 0, 18)), dec("0.01"));
        // 17 seconds = 0.00472.. hours
        assert_eq!(calculate_work_hours(at(9, 0, 0), at(9, 0, 17)), dec("0.00"));
    }

    #[test]
    fn test_twenty_minutes_is_a_third() {
        assert_eq!(calculate_work_hours(at(9, 0, 0), at(9, 20, 0)), dec("0.33"));
        assert_eq!(calculate_work_hours(at(9, 0, 0), at(9, 40, 0)), dec("0.67"));
    }

    #[test]
    fn test_always_two_decimal_places() {
        let hours = calculate_work_hours(at(9, 0, 0), at(17, 0, 0));
        assert_eq!(hours.to_string(), "8.00");
        assert_eq!(hours.scale(), 2);
    }

    #[test]
    fn test_crosses_midnight() {
        let start = at(22, 0, 0);
        let end = start + Duration::hours(9);
        assert_eq!(calculate_work_hours(start, end), dec("9.00"));
    }
}
