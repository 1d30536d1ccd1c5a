//! Payslip generation, edits and payment.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{ActivityEntry, Salary, SalaryStatus};
use crate::policy::{PayrollInput, calculate_payroll, count_attendance, validate_period};
use crate::store::{Store, Tables};

/// Input for a new payslip.
#[derive(Debug, Clone)]
pub struct NewSalary {
    /// The employee being paid.
    pub employee_id: String,
    /// Month (1-12).
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Manual bonus, zero when absent.
    pub bonus: Option<Decimal>,
    /// Manual deduction, zero when absent.
    pub deduction: Option<Decimal>,
}

/// Changes to an unpaid payslip. Absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct SalaryUpdate {
    /// New manual bonus.
    pub bonus: Option<Decimal>,
    /// New manual deduction.
    pub deduction: Option<Decimal>,
    /// New month (1-12).
    pub month: Option<u32>,
    /// New year.
    pub year: Option<i32>,
}

/// Recounts attendance for the payslip's period and reprices it.
fn price(tables: &Tables, salary: &mut Salary) -> PolicyResult<()> {
    let employee = tables.employee(&salary.employee_id)?;
    let company = tables.company(&employee.company_id)?;
    let (present_days, late_days) =
        count_attendance(tables.attendance_for(&employee.id), salary.month, salary.year);

    let breakdown = calculate_payroll(&PayrollInput {
        base_salary: salary.base_salary,
        bonus: salary.bonus,
        deduction: salary.deduction,
        present_days,
        late_days,
        rates: company.settings.payroll.clone(),
    })?;
    debug!(
        employee_id = %employee.id,
        month = salary.month,
        year = salary.year,
        reasoning = %breakdown.reasoning,
        "Payslip priced"
    );

    salary.present_days = present_days;
    salary.late_days = late_days;
    salary.attendance_bonus = breakdown.attendance_bonus;
    salary.total = breakdown.total;
    Ok(())
}

/// Generates an UNPAID payslip for an active employee's month.
pub async fn generate_salary(
    store: &Store,
    new: NewSalary,
    now: DateTime<Utc>,
) -> PolicyResult<Salary> {
    validate_period(new.month, new.year)?;

    let mut tables = store.write().await;
    let employee = tables.employee(&new.employee_id)?.clone();
    employee.ensure_active()?;

    let mut salary = Salary {
        id: Uuid::new_v4(),
        employee_id: employee.id.clone(),
        month: new.month,
        year: new.year,
        base_salary: employee.base_salary,
        bonus: new.bonus.unwrap_or(Decimal::ZERO),
        deduction: new.deduction.unwrap_or(Decimal::ZERO),
        present_days: 0,
        late_days: 0,
        attendance_bonus: Decimal::ZERO,
        total: Decimal::ZERO,
        status: SalaryStatus::Unpaid,
        paid_at: None,
        created_at: now,
    };
    price(&tables, &mut salary)?;
    tables.insert_salary(salary.clone())?;

    tables.record_activity(ActivityEntry::for_employee(
        &employee.company_id,
        &employee.id,
        "salary_generate",
        format!(
            "Generated payslip {}/{} totalling {}",
            salary.month,
            salary.year,
            salary.total.normalize()
        ),
        now,
    ));

    info!(
        employee_id = %employee.id,
        salary_id = %salary.id,
        total = %salary.total,
        "Payslip generated"
    );
    Ok(salary)
}

/// Applies changes to an UNPAID payslip and reprices it.
pub async fn update_salary(
    store: &Store,
    salary_id: Uuid,
    update: SalaryUpdate,
    now: DateTime<Utc>,
) -> PolicyResult<Salary> {
    let mut tables = store.write().await;
    let mut salary = tables.salary(salary_id)?.clone();
    salary.ensure_editable()?;

    if let Some(bonus) = update.bonus {
        salary.bonus = bonus;
    }
    if let Some(deduction) = update.deduction {
        salary.deduction = deduction;
    }
    salary.month = update.month.unwrap_or(salary.month);
    salary.year = update.year.unwrap_or(salary.year);
    validate_period(salary.month, salary.year)?;

    let collides = tables
        .salary_for_period(&salary.employee_id, salary.month, salary.year)
        .is_some_and(|other| other.id != salary.id);
    if collides {
        return Err(PolicyError::DuplicateSalary {
            employee_id: salary.employee_id,
            month: salary.month,
            year: salary.year,
        });
    }

    price(&tables, &mut salary)?;
    *tables.salary_mut(salary_id)? = salary.clone();

    let company_id = tables.employee(&salary.employee_id)?.company_id.clone();
    tables.record_activity(ActivityEntry::for_employee(
        &company_id,
        &salary.employee_id,
        "salary_update",
        format!("Updated payslip {} to {}", salary.id, salary.total.normalize()),
        now,
    ));

    info!(salary_id = %salary.id, total = %salary.total, "Payslip updated");
    Ok(salary)
}

/// Marks an UNPAID payslip PAID. Paying twice is rejected.
pub async fn pay_salary(store: &Store, salary_id: Uuid, now: DateTime<Utc>) -> PolicyResult<Salary> {
    let mut tables = store.write().await;
    let salary = tables.salary_mut(salary_id)?;
    salary.mark_paid(now)?;
    let salary = salary.clone();

    let company_id = tables.employee(&salary.employee_id)?.company_id.clone();
    tables.record_activity(ActivityEntry::for_employee(
        &company_id,
        &salary.employee_id,
        "salary_pay",
        format!("Paid payslip {}/{}", salary.month, salary.year),
        now,
    ));

    info!(salary_id = %salary.id, "Payslip paid");
    Ok(salary)
}

/// Fetches a payslip.
pub async fn get_salary(store: &Store, salary_id: Uuid) -> PolicyResult<Salary> {
    store.read().await.salary(salary_id).cloned()
}
