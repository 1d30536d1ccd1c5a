//! Payroll calculation.
//!
//! A payslip total is
//! `base_salary + bonus - deduction + present_days * attendance_bonus_rate
//! - late_days * late_attendance_penalty_rate`.
//! Totals are not clamped at zero; a large deduction yields a negative
//! amount payable.
//!
//! Monetary inputs are capped at [`MAX_AMOUNT`] and every step uses checked
//! arithmetic, so pricing returns an error instead of overflowing.

use rust_decimal::Decimal;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{Attendance, AttendanceStatus, PayrollSettings};

/// Largest accepted salary, bonus, deduction or per-day rate.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x5D8A_0000, 0x0163_4578, 0, false, 0);

/// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
pub fn validate_amount(field: &str, amount: Decimal) -> PolicyResult<()> {
    if amount < Decimal::ZERO {
        return Err(PolicyError::invalid_field(field, "must not be negative"));
    }
    if amount > MAX_AMOUNT {
        return Err(PolicyError::invalid_field(
            field,
            format!("must not exceed {}", MAX_AMOUNT),
        ));
    }
    Ok(())
}

fn out_of_range() -> PolicyError {
    PolicyError::invalid_field("total", "amount out of range")
}

/// Everything needed to price one payslip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollInput {
    /// The employee's base salary.
    pub base_salary: Decimal,
    /// Manually entered bonus.
    pub bonus: Decimal,
    /// Manually entered deduction.
    pub deduction: Decimal,
    /// PRESENT days in the period.
    pub present_days: u32,
    /// LATE days in the period.
    pub late_days: u32,
    /// The company's per-day rates.
    pub rates: PayrollSettings,
}

/// The priced payslip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollBreakdown {
    /// `present_days * attendance_bonus_rate`.
    pub present_bonus: Decimal,
    /// `late_days * late_attendance_penalty_rate`.
    pub late_penalty: Decimal,
    /// `present_bonus - late_penalty`; stored on the payslip as the
    /// attendance bonus.
    pub attendance_bonus: Decimal,
    /// Amount payable.
    pub total: Decimal,
    /// Human-readable arithmetic, e.g. `5000000 + 200000 - 100000 + 20 x 10000 - 2 x 5000 = 5290000`.
    pub reasoning: String,
}

/// Prices a payslip.
///
/// Bonus and deduction must lie in `0..=MAX_AMOUNT`. An intermediate
/// result that does not fit a `Decimal` is reported as an invalid `total`.
///
/// # Examples
///
/// ```
/// use hr_policy_engine::models::PayrollSettings;
/// use hr_policy_engine::policy::{PayrollInput, calculate_payroll};
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     base_salary: Decimal::from(5_000_000),
///     bonus: Decimal::from(200_000),
///     deduction: Decimal::from(100_000),
///     present_days: 20,
///     late_days: 2,
///     rates: PayrollSettings {
///         attendance_bonus_rate: Decimal::from(10_000),
///         late_attendance_penalty_rate: Decimal::from(5_000),
///     },
/// };
///
/// let breakdown = calculate_payroll(&input).unwrap();
/// assert_eq!(breakdown.total, Decimal::from(5_290_000));
/// assert_eq!(breakdown.attendance_bonus, Decimal::from(190_000));
/// ```
pub fn calculate_payroll(input: &PayrollInput) -> PolicyResult<PayrollBreakdown> {
    validate_amount("bonus", input.bonus)?;
    validate_amount("deduction", input.deduction)?;

    let present_bonus = Decimal::from(input.present_days)
        .checked_mul(input.rates.attendance_bonus_rate)
        .ok_or_else(out_of_range)?;
    let late_penalty = Decimal::from(input.late_days)
        .checked_mul(input.rates.late_attendance_penalty_rate)
        .ok_or_else(out_of_range)?;
    let attendance_bonus = present_bonus
        .checked_sub(late_penalty)
        .ok_or_else(out_of_range)?;
    let total = input
        .base_salary
        .checked_add(input.bonus)
        .and_then(|t| t.checked_sub(input.deduction))
        .and_then(|t| t.checked_add(attendance_bonus))
        .ok_or_else(out_of_range)?;

    let reasoning = format!(
        "{} + {} - {} + {} x {} - {} x {} = {}",
        input.base_salary.normalize(),
        input.bonus.normalize(),
        input.deduction.normalize(),
        input.present_days,
        input.rates.attendance_bonus_rate.normalize(),
        input.late_days,
        input.rates.late_attendance_penalty_rate.normalize(),
        total.normalize()
    );

    Ok(PayrollBreakdown {
        present_bonus,
        late_penalty,
        attendance_bonus,
        total,
        reasoning,
    })
}

/// Counts PRESENT and LATE days among the records dated in (month, year).
pub fn count_attendance<'a>(
    records: impl IntoIterator<Item = &'a Attendance>,
    month: u32,
    year: i32,
) -> (u32, u32) {
    records
        .into_iter()
        .filter(|r| r.is_in_period(month, year))
        .fold((0, 0), |(present, late), r| match r.status {
            AttendanceStatus::Present => (present + 1, late),
            AttendanceStatus::Late => (present, late + 1),
            AttendanceStatus::Absent | AttendanceStatus::OnLeave => (present, late),
        })
}

/// Validates a payslip period.
pub fn validate_period(month: u32, year: i32) -> PolicyResult<()> {
    if !(1..=12).contains(&month) {
        return Err(PolicyError::invalid_field("month", "must be between 1 and 12"));
    }
    if !(1970..=9999).contains(&year) {
        return Err(PolicyError::invalid_field("year", "must be between 1970 and 9999"));
    }
    Ok(())
}
