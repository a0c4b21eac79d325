//! Status derivation and administrative overrides.

use crate::config::AttendanceSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus};

/// Derives a record's status from its check-in time.
///
/// - No check-in: `Absent`
/// - Check-in time of day later than the standard check-in time plus the
///   late threshold: `Late`
/// - Otherwise: `Present`
///
/// `HalfDay` is never derived; it only comes from [`override_status`].
///
/// # Examples
///
/// ```
/// use attendance_engine::config::AttendanceSettings;
/// use attendance_engine::evaluation::derive_status;
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
///
/// let settings = AttendanceSettings::default(); // 09:00 + 15 min
/// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let mut record = AttendanceRecord::new("EMP001", date);
/// assert_eq!(derive_status(&record, &settings), AttendanceStatus::Absent);
///
/// record.check_in_time = date.and_hms_opt(9, 15, 0);
/// assert_eq!(derive_status(&record, &settings), AttendanceStatus::Present);
///
/// record.check_in_time = date.and_hms_opt(9, 20, 0);
/// assert_eq!(derive_status(&record, &settings), AttendanceStatus::Late);
/// ```
pub fn derive_status(record: &AttendanceRecord, settings: &AttendanceSettings) -> AttendanceStatus {
    match record.check_in_time {
        None => AttendanceStatus::Absent,
        Some(check_in) if check_in.time() > settings.late_cutoff() => AttendanceStatus::Late,
        Some(_) => AttendanceStatus::Present,
    }
}

/// Applies an administrator's status override, returning the updated record.
///
/// The only status an administrator may choose freely is `HalfDay`. Any
/// other target must equal what [`derive_status`] gives for the record, so
/// an override can undo an earlier half-day but never contradict the
/// check-in time. Timestamps and work hours are left untouched. `notes`,
/// when given, replaces the record's notes.
///
/// # Errors
///
/// [`EngineError::InvalidOverride`] when the target is not `HalfDay` and
/// differs from the derived status, e.g. `Present` for a late check-in or
/// `Late` for a day with no check-in.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::AttendanceSettings;
/// use attendance_engine::evaluation::override_status;
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
///
/// let settings = AttendanceSettings::default();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let mut record = AttendanceRecord::new("EMP001", date);
/// record.check_in_time = date.and_hms_opt(10, 0, 0);
/// record.status = AttendanceStatus::Late;
///
/// assert!(override_status(&settings, &record, AttendanceStatus::Present, None).is_err());
///
/// let half_day = override_status(&settings, &record, AttendanceStatus::HalfDay, None).unwrap();
/// let reset = override_status(&settings, &half_day, AttendanceStatus::Late, None).unwrap();
/// assert_eq!(reset.status, AttendanceStatus::Late);
/// ```
pub fn override_status(
    settings: &AttendanceSettings,
    record: &AttendanceRecord,
    status: AttendanceStatus,
    notes: Option<&str>,
) -> EngineResult<AttendanceRecord> {
    let derived = derive_status(record, settings);
    if status != AttendanceStatus::HalfDay && status != derived {
        return Err(EngineError::InvalidOverride {
            message: format!(
                "status follows the check-in time; expected {} or {}, got {}",
                AttendanceStatus::HalfDay.display_name(),
                derived.display_name(),
                status.display_name()
            ),
        });
    }

    let mut updated = record.clone();
    updated.status = status;
    if let Some(notes) = notes {
        updated.notes = notes.to_string();
    }
    Ok(updated)
}
