//! Payslip (salary) model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PolicyError, PolicyResult};

/// Whether a payslip has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalaryStatus {
    /// Generated but not yet paid; still editable.
    Unpaid,
    /// Paid; immutable from here on.
    Paid,
}

/// One payslip for one employee for one (month, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    /// Unique identifier for the payslip.
    pub id: Uuid,
    /// The employee being paid.
    pub employee_id: String,
    /// Month of the pay period (1-12).
    pub month: u32,
    /// Year of the pay period.
    pub year: i32,
    /// Base salary copied from the employee at generation time.
    pub base_salary: Decimal,
    /// Manually entered bonus.
    pub bonus: Decimal,
    /// Manually entered deduction.
    pub deduction: Decimal,
    /// PRESENT days counted for the period.
    pub present_days: u32,
    /// LATE days counted for the period.
    pub late_days: u32,
    /// Attendance bonus net of late penalties.
    pub attendance_bonus: Decimal,
    /// Amount payable.
    pub total: Decimal,
    /// Payment status.
    pub status: SalaryStatus,
    /// When the payslip was marked paid.
    pub paid_at: Option<DateTime<Utc>>,
    /// When the payslip was generated.
    pub created_at: DateTime<Utc>,
}

impl Salary {
    /// Returns true once the payslip has been paid.
    pub fn is_paid(&self) -> bool {
        self.status == SalaryStatus::Paid
    }

    /// Fails with [`PolicyError::SalaryAlreadyPaid`] once the payslip is paid.
    pub fn ensure_editable(&self) -> PolicyResult<()> {
        if self.is_paid() {
            return Err(PolicyError::SalaryAlreadyPaid { salary_id: self.id });
        }
        Ok(())
    }

    /// Transitions UNPAID to PAID. Paying twice is an error.
    pub fn mark_paid(&mut self, now: DateTime<Utc>) -> PolicyResult<()> {
        self.ensure_editable()?;
        self.status = SalaryStatus::Paid;
        self.paid_at = Some(now);
        Ok(())
    }
}
