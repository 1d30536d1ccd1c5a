//! Employee lifecycle: hire and terminate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{ActivityEntry, Employee, EmployeeRole, Gender};
use crate::policy::{local_date, validate_amount};
use crate::store::Store;

/// Input for hiring an employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Explicit employee id; generated when absent.
    pub id: Option<String>,
    /// The user account to pair with.
    pub user_id: String,
    /// The hiring company.
    pub company_id: String,
    /// Optional department.
    pub department_id: Option<String>,
    /// Full name.
    pub name: String,
    /// Role.
    pub role: EmployeeRole,
    /// Gender.
    pub gender: Gender,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Join date; defaults to today (local).
    pub join_date: Option<NaiveDate>,
}

/// Creates an active employee paired with a user. The user id is stored
/// trimmed.
pub async fn register_employee(
    store: &Store,
    new: NewEmployee,
    now: DateTime<Utc>,
) -> PolicyResult<Employee> {
    if new.user_id.trim().is_empty() {
        return Err(PolicyError::invalid_field("user_id", "must not be empty"));
    }
    if new.name.trim().is_empty() {
        return Err(PolicyError::invalid_field("name", "must not be empty"));
    }
    validate_amount("base_salary", new.base_salary)?;

    let mut tables = store.write().await;
    tables.company(&new.company_id)?;

    let employee = Employee {
        id: new
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("emp_{}", Uuid::new_v4().simple())),
        user_id: new.user_id.trim().to_string(),
        company_id: new.company_id,
        department_id: new.department_id,
        name: new.name,
        role: new.role,
        gender: new.gender,
        base_salary: new.base_salary,
        is_active: true,
        join_date: new.join_date.unwrap_or_else(|| local_date(now)),
    };
    tables.insert_employee(employee.clone())?;
    tables.record_activity(ActivityEntry::for_employee(
        &employee.company_id,
        &employee.id,
        "hire",
        format!("Hired {} as {:?}", employee.name, employee.role),
        now,
    ));

    info!(
        employee_id = %employee.id,
        company_id = %employee.company_id,
        "Employee registered"
    );
    Ok(employee)
}

/// Fetches an employee by id.
pub async fn get_employee(store: &Store, employee_id: &str) -> PolicyResult<Employee> {
    store.read().await.employee(employee_id).cloned()
}

/// Soft-deletes an employee. Records are kept; the employee can no longer
/// check in, request leave or receive new payslips.
pub async fn terminate_employee(
    store: &Store,
    employee_id: &str,
    now: DateTime<Utc>,
) -> PolicyResult<Employee> {
    let mut tables = store.write().await;
    let employee = tables.employee_mut(employee_id)?;
    employee.ensure_active()?;
    employee.is_active = false;
    let employee = employee.clone();

    tables.record_activity(ActivityEntry::for_employee(
        &employee.company_id,
        &employee.id,
        "terminate",
        format!("Terminated {}", employee.name),
        now,
    ));

    info!(employee_id = %employee.id, "Employee terminated");
    Ok(employee)
}
