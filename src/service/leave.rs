//! Leave requests, decisions and balances.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{
    ActivityEntry, Attendance, AttendanceStatus, Employee, Leave, LeaveStatus, LeaveType,
};
use crate::policy::{
    LeaveBalance, LeaveRequest, ensure_no_pending, leave_balances, validate_leave_request,
};
use crate::store::{Store, Tables};

/// Who a leave request is filed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveRequester {
    /// Filed by an administrator on behalf of an employee.
    Employee(String),
    /// Filed by the employee paired with this user.
    User(String),
}

/// Input for a new leave request.
#[derive(Debug, Clone)]
pub struct NewLeave {
    /// Who the leave is for.
    pub requester: LeaveRequester,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason.
    pub reason: String,
}

fn resolve_requester(tables: &Tables, requester: &LeaveRequester) -> PolicyResult<Employee> {
    let employee = match requester {
        LeaveRequester::Employee(id) => tables.employee(id)?,
        LeaveRequester::User(user_id) if user_id.trim().is_empty() => {
            return Err(PolicyError::Unauthenticated);
        }
        LeaveRequester::User(user_id) => tables.employee_by_user(user_id)?,
    };
    Ok(employee.clone())
}

/// Files a PENDING leave request after validating it against the
/// company's policy. Self-service and admin requests share this path.
pub async fn request_leave(store: &Store, new: NewLeave, now: DateTime<Utc>) -> PolicyResult<Leave> {
    let mut tables = store.write().await;
    let employee = resolve_requester(&tables, &new.requester)?;
    employee.ensure_active()?;

    let existing = tables.leaves_for(&employee.id);
    ensure_no_pending(&existing)?;

    let company = tables.company(&employee.company_id)?;
    let request = LeaveRequest {
        leave_type: new.leave_type,
        start_date: new.start_date,
        end_date: new.end_date,
    };
    let check = validate_leave_request(
        &employee,
        company.leave_policy(new.leave_type),
        &existing,
        &request,
        now,
    )?;
    debug!(
        employee_id = %employee.id,
        leave_type = %new.leave_type,
        used = check.used_days,
        requested = check.requested_days,
        limit = ?check.allowed_days,
        "Leave quota check passed"
    );

    let leave = Leave {
        id: Uuid::new_v4(),
        employee_id: employee.id.clone(),
        leave_type: new.leave_type,
        start_date: new.start_date,
        end_date: new.end_date,
        reason: new.reason,
        status: LeaveStatus::Pending,
        created_at: now,
    };
    tables.insert_leave(leave.clone());
    tables.record_activity(ActivityEntry::for_employee(
        &employee.company_id,
        &employee.id,
        "leave_request",
        format!(
            "Requested {} leave {} to {} ({} days)",
            leave.leave_type, leave.start_date, leave.end_date, check.requested_days
        ),
        now,
    ));

    info!(
        employee_id = %employee.id,
        leave_id = %leave.id,
        leave_type = %leave.leave_type,
        "Leave requested"
    );
    Ok(leave)
}

/// Moves a PENDING leave to `to`. Only PENDING leaves can change.
fn decide(
    tables: &mut Tables,
    leave_id: Uuid,
    to: LeaveStatus,
    now: DateTime<Utc>,
) -> PolicyResult<Leave> {
    let leave = tables.leave_mut(leave_id)?;
    if leave.status != LeaveStatus::Pending {
        return Err(PolicyError::InvalidLeaveTransition {
            from: leave.status,
            to,
        });
    }
    leave.status = to;
    let leave = leave.clone();

    let company_id = tables.employee(&leave.employee_id)?.company_id.clone();
    tables.record_activity(ActivityEntry::for_employee(
        &company_id,
        &leave.employee_id,
        "leave_decision",
        format!("Leave {} marked {}", leave.id, to),
        now,
    ));

    info!(leave_id = %leave.id, status = %to, "Leave status changed");
    Ok(leave)
}

/// Approves a pending leave and marks each covered day ON_LEAVE, except
/// days the employee has already checked in.
pub async fn approve_leave(store: &Store, leave_id: Uuid, now: DateTime<Utc>) -> PolicyResult<Leave> {
    let mut tables = store.write().await;
    let leave = decide(&mut tables, leave_id, LeaveStatus::Approved, now)?;

    for day in leave.days() {
        let record = match tables.attendance(&leave.employee_id, day) {
            Some(existing) if existing.check_in.is_some() => continue,
            Some(existing) => {
                let mut record = existing.clone();
                record.status = AttendanceStatus::OnLeave;
                record
            }
            None => Attendance::new(&leave.employee_id, day, AttendanceStatus::OnLeave),
        };
        tables.upsert_attendance(record);
    }

    Ok(leave)
}

/// Rejects a pending leave.
pub async fn reject_leave(store: &Store, leave_id: Uuid, now: DateTime<Utc>) -> PolicyResult<Leave> {
    decide(&mut *store.write().await, leave_id, LeaveStatus::Rejected, now)
}

/// Cancels a pending leave.
pub async fn cancel_leave(store: &Store, leave_id: Uuid, now: DateTime<Utc>) -> PolicyResult<Leave> {
    decide(&mut *store.write().await, leave_id, LeaveStatus::Cancelled, now)
}

/// Lists an employee's leaves, oldest first.
pub async fn employee_leaves(store: &Store, employee_id: &str) -> PolicyResult<Vec<Leave>> {
    let tables = store.read().await;
    tables.employee(employee_id)?;
    Ok(tables.leaves_for(employee_id))
}

/// Used and remaining days per company policy for an employee.
pub async fn employee_leave_balances(
    store: &Store,
    employee_id: &str,
    now: DateTime<Utc>,
) -> PolicyResult<Vec<LeaveBalance>> {
    let tables = store.read().await;
    let employee = tables.employee(employee_id)?;
    let company = tables.company(&employee.company_id)?;
    let leaves = tables.leaves_for(&employee.id);
    Ok(leave_balances(&company.leave_policies, &leaves, now))
}
