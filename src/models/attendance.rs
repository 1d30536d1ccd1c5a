//! Attendance model.
//!
//! One [`Attendance`] record exists per employee per calendar day (in the
//! company's local timezone).

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The outcome recorded for an employee's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Checked in on time.
    Present,
    /// Checked in after the company's check-in end time.
    Late,
    /// Did not check in.
    Absent,
    /// Covered by an approved leave.
    OnLeave,
}

/// An employee's attendance for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The local calendar day.
    pub date: NaiveDate,
    /// When the employee checked in.
    pub check_in: Option<DateTime<Utc>>,
    /// When the employee checked out.
    pub check_out: Option<DateTime<Utc>>,
    /// The status for the day.
    pub status: AttendanceStatus,
}

impl Attendance {
    /// Creates an empty record for a day with the given status.
    pub fn new(employee_id: impl Into<String>, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            date,
            check_in: None,
            check_out: None,
            status,
        }
    }

    /// Hours between check-in and check-out, or `None` until both exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_policy_engine::models::{Attendance, AttendanceStatus};
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let mut record = Attendance::new(
    ///     "emp_001",
    ///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     AttendanceStatus::Present,
    /// );
    /// record.check_in = Some(Utc.with_ymd_and_hms(2026, 3, 2, 1, 0, 0).unwrap());
    /// record.check_out = Some(Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap());
    /// assert_eq!(record.worked_hours(), Some(Decimal::new(85, 1)));
    /// ```
    pub fn worked_hours(&self) -> Option<Decimal> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Some(hours_between(check_in, check_out)),
            _ => None,
        }
    }

    /// Returns true if the record's date falls in the given month and year.
    pub fn is_in_period(&self, month: u32, year: i32) -> bool {
        self.date.month() == month && self.date.year() == year
    }
}

/// Elapsed decimal hours between two instants.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> Decimal {
    Decimal::from((to - from).num_seconds()) / Decimal::from(3600)
}

/// Per-status day counts for a set of attendance records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days checked in on time.
    pub present: u32,
    /// Days checked in late.
    pub late: u32,
    /// Days marked absent.
    pub absent: u32,
    /// Days covered by approved leave.
    pub on_leave: u32,
}

impl AttendanceSummary {
    /// Tallies the given records by status.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Attendance>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut summary, record| {
                match record.status {
                    AttendanceStatus::Present => summary.present += 1,
                    AttendanceStatus::Late => summary.late += 1,
                    AttendanceStatus::Absent => summary.absent += 1,
                    AttendanceStatus::OnLeave => summary.on_leave += 1,
                }
                summary
            })
    }
}
