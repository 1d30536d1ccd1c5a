//! Request types for the HR Policy Engine API.
//!
//! This module defines the JSON request bodies and their conversion into
//! service inputs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};
use crate::models::{EmployeeRole, Gender, LeaveType};
use crate::service::{LeaveRequester, NewEmployee, NewLeave, NewSalary, SalaryUpdate};

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Explicit employee id; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// The user account to pair with.
    pub user_id: String,
    /// The hiring company.
    pub company_id: String,
    /// Optional department.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Full name.
    pub name: String,
    /// Role, STAFF when absent.
    #[serde(default = "default_role")]
    pub role: EmployeeRole,
    /// Gender.
    pub gender: Gender,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Join date; defaults to today.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
}

fn default_role() -> EmployeeRole {
    EmployeeRole::Staff
}

impl From<EmployeeRequest> for NewEmployee {
    fn from(req: EmployeeRequest) -> Self {
        NewEmployee {
            id: req.id,
            user_id: req.user_id,
            company_id: req.company_id,
            department_id: req.department_id,
            name: req.name,
            role: req.role,
            gender: req.gender,
            base_salary: req.base_salary,
            join_date: req.join_date,
        }
    }
}

/// Request body for check-in and check-out.
///
/// `user_id` is optional at the JSON level so that a missing identity is
/// reported as unauthenticated rather than as malformed input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// The caller's user id.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl AttendanceRequest {
    /// The caller's user id. Missing or blank ids are unauthenticated.
    pub fn user_id(&self) -> PolicyResult<&str> {
        match self.user_id.as_deref().map(str::trim) {
            Some(user_id) if !user_id.is_empty() => Ok(user_id),
            _ => Err(PolicyError::Unauthenticated),
        }
    }
}

/// Query for `GET /employees/:id/attendance`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Month (1-12).
    pub month: u32,
    /// Year.
    pub year: i32,
}

/// Request body for `POST /leaves`.
///
/// Exactly one of `employee_id` (admin path) or `user_id` (self-service)
/// identifies the employee; `employee_id` wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestBody {
    /// The employee, when filed by an administrator.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The requesting user, for self-service requests.
    #[serde(default)]
    pub user_id: Option<String>,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl TryFrom<LeaveRequestBody> for NewLeave {
    type Error = PolicyError;

    fn try_from(req: LeaveRequestBody) -> PolicyResult<Self> {
        let requester = match (req.employee_id, req.user_id) {
            (Some(employee_id), _) if !employee_id.trim().is_empty() => {
                LeaveRequester::Employee(employee_id)
            }
            (_, Some(user_id)) if !user_id.trim().is_empty() => LeaveRequester::User(user_id),
            _ => return Err(PolicyError::Unauthenticated),
        };

        Ok(NewLeave {
            requester,
            leave_type: req.leave_type,
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason,
        })
    }
}

/// Request body for `POST /salaries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// The employee being paid.
    pub employee_id: String,
    /// Month (1-12).
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Manual bonus.
    #[serde(default)]
    pub bonus: Option<Decimal>,
    /// Manual deduction.
    #[serde(default)]
    pub deduction: Option<Decimal>,
}

impl From<SalaryRequest> for NewSalary {
    fn from(req: SalaryRequest) -> Self {
        NewSalary {
            employee_id: req.employee_id,
            month: req.month,
            year: req.year,
            bonus: req.bonus,
            deduction: req.deduction,
        }
    }
}

/// Request body for `PUT /salaries/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryUpdateRequest {
    /// New manual bonus.
    #[serde(default)]
    pub bonus: Option<Decimal>,
    /// New manual deduction.
    #[serde(default)]
    pub deduction: Option<Decimal>,
    /// New month (1-12).
    #[serde(default)]
    pub month: Option<u32>,
    /// New year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl From<SalaryUpdateRequest> for SalaryUpdate {
    fn from(req: SalaryUpdateRequest) -> Self {
        SalaryUpdate {
            bonus: req.bonus,
            deduction: req.deduction,
            month: req.month,
            year: req.year,
        }
    }
}
