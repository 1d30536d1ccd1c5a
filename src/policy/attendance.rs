//! Attendance policy: check-in status and check-in/check-out windows.
//!
//! Both evaluations are pure. They look at today's existing record (if
//! any), the company's [`AttendanceSettings`] and the current instant,
//! and either reject the attempt or describe what should be written.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{Attendance, AttendanceSettings, AttendanceStatus, hhmm, hours_between};

use super::clock::{local_date, local_time, minute_of_day};

/// Hard daily cutoff after which no check-in is accepted, in minutes
/// since local midnight (16:00).
///
/// Times are compared at minute granularity, so seconds are ignored: a
/// check-in at 16:00:59 falls in minute 16:00 and is accepted, while
/// 16:01:00 is rejected. The company time windows use the same rule.
pub const CHECK_IN_CUTOFF_MINUTE: u32 = 16 * 60;

/// The accepted outcome of a check-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInOutcome {
    /// The local day the check-in belongs to.
    pub date: NaiveDate,
    /// PRESENT or LATE.
    pub status: AttendanceStatus,
    /// Minutes past the company's check-in end time (0 when on time).
    pub minutes_late: u32,
}

/// The accepted outcome of a check-out attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutOutcome {
    /// Hours between check-in and now.
    pub worked_hours: Decimal,
}

/// Decides whether a check-in at `now` is accepted and with which status.
///
/// # Rules
///
/// 1. A day that already has a check-in is rejected (`Already checked in today.`).
/// 2. Local time after 16:00 is rejected. Seconds are ignored, so
///    16:00:59 is still accepted.
/// 3. Local time after the company's `check_in_end_time` is LATE, otherwise PRESENT.
///
/// # Examples
///
/// ```
/// use hr_policy_engine::models::{AttendanceSettings, AttendanceStatus};
/// use hr_policy_engine::policy::{evaluate_check_in, from_local};
/// use chrono::NaiveDateTime;
///
/// let settings = AttendanceSettings::default(); // check-in ends 09:00
/// let now = from_local(
///     NaiveDateTime::parse_from_str("2026-03-02 09:20:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// );
///
/// let outcome = evaluate_check_in(None, &settings, now).unwrap();
/// assert_eq!(outcome.status, AttendanceStatus::Late);
/// assert_eq!(outcome.minutes_late, 20);
/// ```
pub fn evaluate_check_in(
    today: Option<&Attendance>,
    settings: &AttendanceSettings,
    now: DateTime<Utc>,
) -> PolicyResult<CheckInOutcome> {
    if today.is_some_and(|record| record.check_in.is_some()) {
        return Err(PolicyError::AlreadyCheckedIn);
    }

    let minute = minute_of_day(local_time(now));
    if minute > CHECK_IN_CUTOFF_MINUTE {
        return Err(PolicyError::CheckInClosed {
            cutoff: format_minute(CHECK_IN_CUTOFF_MINUTE),
        });
    }

    let end_minute = minute_of_day(settings.check_in_end_time);
    let (status, minutes_late) = if minute > end_minute {
        (AttendanceStatus::Late, minute - end_minute)
    } else {
        (AttendanceStatus::Present, 0)
    };

    Ok(CheckInOutcome {
        date: local_date(now),
        status,
        minutes_late,
    })
}

/// Decides whether a check-out at `now` is accepted.
///
/// # Rules (checked in this order)
///
/// 1. No record or no check-in today is rejected.
/// 2. A record that already has a check-out is rejected.
/// 3. Fewer hours than `minimum_work_hours` since check-in is rejected.
/// 4. Local time after `latest_check_out` is rejected.
pub fn evaluate_check_out(
    today: Option<&Attendance>,
    settings: &AttendanceSettings,
    now: DateTime<Utc>,
) -> PolicyResult<CheckOutOutcome> {
    let record = today.ok_or(PolicyError::NotCheckedIn)?;
    let check_in = record.check_in.ok_or(PolicyError::NotCheckedIn)?;

    if record.check_out.is_some() {
        return Err(PolicyError::AlreadyCheckedOut);
    }

    let worked_hours = hours_between(check_in, now);
    if worked_hours < settings.minimum_work_hours {
        return Err(PolicyError::MinimumWorkHoursNotMet {
            worked: worked_hours.round_dp(2),
            minimum: settings.minimum_work_hours,
        });
    }

    if minute_of_day(local_time(now)) > minute_of_day(settings.latest_check_out) {
        return Err(PolicyError::CheckOutClosed {
            latest: hhmm::format(&settings.latest_check_out),
        });
    }

    Ok(CheckOutOutcome { worked_hours })
}

fn format_minute(minute: u32) -> String {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0)
        .map(|t| hhmm::format(&t))
        .unwrap_or_else(|| format!("{:02}:{:02}", minute / 60, minute % 60))
}
