//! Leave request and leave policy models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    /// Sick leave.
    Sick,
    /// Annual (vacation) leave.
    Annual,
    /// Unpaid leave. Never subject to quota.
    Unpaid,
    /// Maternity leave. Female employees only.
    Maternity,
}

impl LeaveType {
    /// Returns the wire name of the leave type.
    pub fn as_str(self) -> &'static str {
        match self {
            LeaveType::Sick => "SICK",
            LeaveType::Annual => "ANNUAL",
            LeaveType::Unpaid => "UNPAID",
            LeaveType::Maternity => "MATERNITY",
        }
    }

    /// Returns true if requests of this type skip quota enforcement.
    pub fn is_quota_exempt(self) -> bool {
        self == LeaveType::Unpaid
    }

    /// Returns true if only female employees may request this type.
    pub fn is_female_only(self) -> bool {
        self == LeaveType::Maternity
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a leave request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; counts against the quota.
    Approved,
    /// Rejected by an approver.
    Rejected,
    /// Withdrawn by the requester.
    Cancelled,
}

impl LeaveStatus {
    /// Returns the wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
            LeaveStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a leave quota resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResetFrequency {
    /// Resets on the first day of each month.
    Monthly,
    /// Resets on the first day of each year.
    Yearly,
}

/// A company's quota for one leave type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// The leave type this policy governs.
    pub leave_type: LeaveType,
    /// Days allowed per period.
    pub allowed_days: u32,
    /// When the quota resets.
    pub frequency: ResetFrequency,
}

/// A leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    /// Unique identifier for the leave.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: String,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason.
    pub reason: String,
    /// Current status.
    pub status: LeaveStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

impl Leave {
    /// Number of days covered, counting both ends.
    pub fn day_count(&self) -> i64 {
        inclusive_days(self.start_date, self.end_date)
    }

    /// Iterates over every day covered by the leave.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= self.end_date)
    }
}

/// Inclusive day count of `[start, end]`.
///
/// # Examples
///
/// ```
/// use hr_policy_engine::models::inclusive_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
/// assert_eq!(inclusive_days(start, end), 5);
/// assert_eq!(inclusive_days(start, start), 1);
/// ```
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn leave(start: NaiveDate, end: NaiveDate) -> Leave {
        Leave {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            leave_type: LeaveType::Annual,
            start_date: start,
            end_date: end,
            reason: "holiday".to_string(),
            status: LeaveStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_day_count_spans_month_boundary() {
        let l = leave(date(2026, 1, 30), date(2026, 2, 2));
        assert_eq!(l.day_count(), 4);
    }

    #[test]
    fn test_days_iterates_inclusive_range() {
        let l = leave(date(2026, 2, 27), date(2026, 3, 1));
        let days: Vec<NaiveDate> = l.days().collect();
        assert_eq!(
            days,
            vec![date(2026, 2, 27), date(2026, 2, 28), date(2026, 3, 1)]
        );
    }

    #[test]
    fn test_leave_type_display_matches_wire_name() {
        assert_eq!(LeaveType::Maternity.to_string(), "MATERNITY");
        assert_eq!(
            serde_json::to_string(&LeaveType::Maternity).unwrap(),
            "\"MATERNITY\""
        );
        assert_eq!(LeaveStatus::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn test_only_unpaid_is_quota_exempt() {
        assert!(LeaveType::Unpaid.is_quota_exempt());
        assert!(!LeaveType::Annual.is_quota_exempt());
        assert!(!LeaveType::Sick.is_quota_exempt());
        assert!(!LeaveType::Maternity.is_quota_exempt());
    }

    #[test]
    fn test_deserialize_policy() {
        let policy: LeavePolicy = serde_json::from_str(
            r#"{ "leave_type": "SICK", "allowed_days": 3, "frequency": "MONTHLY" }"#,
        )
        .unwrap();
        assert_eq!(policy.leave_type, LeaveType::Sick);
        assert_eq!(policy.frequency, ResetFrequency::Monthly);
    }
}
