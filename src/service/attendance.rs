//! Check-in, check-out and attendance reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{ActivityEntry, Attendance, AttendanceSummary, Employee};
use crate::policy::{evaluate_check_in, evaluate_check_out, local_date};
use crate::store::{Store, Tables};

/// An employee's attendance for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// The employee.
    pub employee_id: String,
    /// Month (1-12).
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Records in the month, oldest first.
    pub records: Vec<Attendance>,
    /// Per-status counts.
    pub summary: AttendanceSummary,
}

fn active_employee_for_user(tables: &Tables, user_id: &str) -> PolicyResult<Employee> {
    if user_id.trim().is_empty() {
        return Err(PolicyError::Unauthenticated);
    }
    let employee = tables.employee_by_user(user_id)?.clone();
    employee.ensure_active()?;
    Ok(employee)
}

/// Records a check-in for the user's employee at `now`.
pub async fn check_in(store: &Store, user_id: &str, now: DateTime<Utc>) -> PolicyResult<Attendance> {
    let mut tables = store.write().await;
    let employee = active_employee_for_user(&tables, user_id)?;
    let settings = &tables.company(&employee.company_id)?.settings.attendance;

    let today = local_date(now);
    let existing = tables.attendance(&employee.id, today);
    let outcome = evaluate_check_in(existing, settings, now)?;

    let mut record = existing
        .cloned()
        .unwrap_or_else(|| Attendance::new(&employee.id, outcome.date, outcome.status));
    record.check_in = Some(now);
    record.status = outcome.status;
    tables.upsert_attendance(record.clone());

    tables.record_activity(ActivityEntry::for_employee(
        &employee.company_id,
        &employee.id,
        "check_in",
        format!("Checked in on {} ({:?})", record.date, record.status),
        now,
    ));

    info!(
        employee_id = %employee.id,
        date = %record.date,
        status = ?record.status,
        minutes_late = outcome.minutes_late,
        "Checked in"
    );
    Ok(record)
}

/// Records a check-out for the user's employee at `now`.
pub async fn check_out(
    store: &Store,
    user_id: &str,
    now: DateTime<Utc>,
) -> PolicyResult<Attendance> {
    let mut tables = store.write().await;
    let employee = active_employee_for_user(&tables, user_id)?;
    let settings = &tables.company(&employee.company_id)?.settings.attendance;

    let today = local_date(now);
    let existing = tables.attendance(&employee.id, today);
    let outcome = evaluate_check_out(existing, settings, now)?;

    let mut record = existing.cloned().ok_or(PolicyError::NotCheckedIn)?;
    record.check_out = Some(now);
    tables.upsert_attendance(record.clone());

    tables.record_activity(ActivityEntry::for_employee(
        &employee.company_id,
        &employee.id,
        "check_out",
        format!(
            "Checked out on {} after {} hours",
            record.date,
            outcome.worked_hours.round_dp(2)
        ),
        now,
    ));

    info!(
        employee_id = %employee.id,
        date = %record.date,
        worked_hours = %outcome.worked_hours.round_dp(2),
        "Checked out"
    );
    Ok(record)
}

/// Lists an employee's attendance for a month with per-status counts.
pub async fn attendance_report(
    store: &Store,
    employee_id: &str,
    month: u32,
    year: i32,
) -> PolicyResult<AttendanceReport> {
    crate::policy::validate_period(month, year)?;

    let tables = store.read().await;
    let employee = tables.employee(employee_id)?;
    let records: Vec<Attendance> = tables
        .attendance_for(&employee.id)
        .filter(|r| r.is_in_period(month, year))
        .cloned()
        .collect();
    let summary = AttendanceSummary::from_records(&records);

    Ok(AttendanceReport {
        employee_id: employee.id.clone(),
        month,
        year,
        records,
        summary,
    })
}
