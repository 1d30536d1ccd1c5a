//! Wall-clock handling for attendance and leave rules.
//!
//! Every policy comparison is made against local time at a fixed GMT+7
//! offset, independent of the server's timezone. The current instant is
//! always passed in explicitly; the [`Clock`] trait lets the HTTP layer
//! supply it from the system or, in tests, from a settable fixed value.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

/// Offset of local policy time from UTC, in hours.
pub const LOCAL_UTC_OFFSET_HOURS: i64 = 7;

/// Converts a UTC instant to local (GMT+7) wall-clock time.
///
/// # Examples
///
/// ```
/// use hr_policy_engine::policy::local_datetime;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2026, 3, 1, 20, 30, 0).unwrap();
/// assert_eq!(local_datetime(now).to_string(), "2026-03-02 03:30:00");
/// ```
pub fn local_datetime(now: DateTime<Utc>) -> NaiveDateTime {
    now.naive_utc() + Duration::hours(LOCAL_UTC_OFFSET_HOURS)
}

/// The local calendar day of `now`.
pub fn local_date(now: DateTime<Utc>) -> NaiveDate {
    local_datetime(now).date()
}

/// The local time of day of `now`.
pub fn local_time(now: DateTime<Utc>) -> NaiveTime {
    local_datetime(now).time()
}

/// Converts a local (GMT+7) wall-clock time back to a UTC instant.
pub fn from_local(local: NaiveDateTime) -> DateTime<Utc> {
    (local - Duration::hours(LOCAL_UTC_OFFSET_HOURS)).and_utc()
}

/// Minutes since local midnight, ignoring seconds.
///
/// Window checks compare at this granularity to match the `HH:MM`
/// configuration format.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that returns a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    instant: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock frozen at `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Creates a clock frozen at a local (GMT+7) wall-clock time.
    pub fn at_local(local: NaiveDateTime) -> Self {
        Self::new(from_local(local))
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Moves the clock to a local (GMT+7) wall-clock time.
    pub fn set_local(&self, local: NaiveDateTime) {
        self.set(from_local(local));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
