//! Company (tenant) model and its policy settings.
//!
//! Each company carries its own attendance window, payroll rates and
//! leave policies. Times of day are written as `HH:MM` in both the YAML
//! configuration and the JSON API.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LeavePolicy, LeaveType};

/// Serde adapter for `HH:MM` times of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%H:%M";

    /// Formats a time as `HH:MM`, dropping seconds.
    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    /// Parses an `HH:MM` string.
    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
    }

    /// Serializes a time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    /// Deserializes a time from `HH:MM`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| D::Error::custom(format!("invalid HH:MM time '{}': {}", raw, e)))
    }
}

fn default_check_in_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_latest_check_out() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_minimum_work_hours() -> Decimal {
    Decimal::from(4)
}

/// The company's check-in/check-out window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSettings {
    /// Check-ins after this time of day are marked LATE.
    #[serde(with = "hhmm", default = "default_check_in_end_time")]
    pub check_in_end_time: NaiveTime,
    /// Check-outs after this time of day are rejected.
    #[serde(with = "hhmm", default = "default_latest_check_out")]
    pub latest_check_out: NaiveTime,
    /// Minimum hours between check-in and check-out.
    #[serde(default = "default_minimum_work_hours")]
    pub minimum_work_hours: Decimal,
}

impl Default for AttendanceSettings {
    fn default() -> Self {
        Self {
            check_in_end_time: default_check_in_end_time(),
            latest_check_out: default_latest_check_out(),
            minimum_work_hours: default_minimum_work_hours(),
        }
    }
}

/// Per-day attendance rates applied when generating payslips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Bonus paid for each PRESENT day.
    #[serde(default)]
    pub attendance_bonus_rate: Decimal,
    /// Penalty deducted for each LATE day.
    #[serde(default)]
    pub late_attendance_penalty_rate: Decimal,
}

/// All configurable settings for a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySettings {
    /// Attendance window.
    #[serde(default)]
    pub attendance: AttendanceSettings,
    /// Payroll rates.
    #[serde(default)]
    pub payroll: PayrollSettings,
}

/// A company (tenant) and its policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier for the company.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Attendance and payroll settings.
    #[serde(default)]
    pub settings: CompanySettings,
    /// Leave policies, at most one per leave type.
    #[serde(default)]
    pub leave_policies: Vec<LeavePolicy>,
}

impl Company {
    /// Returns the company's policy for a leave type, if any.
    pub fn leave_policy(&self, leave_type: LeaveType) -> Option<&LeavePolicy> {
        self.leave_policies
            .iter()
            .find(|p| p.leave_type == leave_type)
    }

    /// Inserts a policy, replacing any existing policy for the same type.
    pub fn upsert_leave_policy(&mut self, policy: LeavePolicy) {
        match self
            .leave_policies
            .iter_mut()
            .find(|p| p.leave_type == policy.leave_type)
        {
            Some(existing) => *existing = policy,
            None => self.leave_policies.push(policy),
        }
    }
}
