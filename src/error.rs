//! Error types for the HR Policy Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every policy violation and lookup failure the engine can report.
//! The display strings double as the human-readable messages returned to
//! API clients.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{LeaveStatus, LeaveType};

/// The main error type for the HR Policy Engine.
///
/// # Example
///
/// ```
/// use hr_policy_engine::error::PolicyError;
///
/// let error = PolicyError::AlreadyCheckedIn;
/// assert_eq!(error.to_string(), "Already checked in today.");
/// ```
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or was inconsistent.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The request carried no user identity.
    #[error("Unauthorized: a user id is required")]
    Unauthenticated,

    /// No company exists with the given id.
    #[error("Company not found: {company_id}")]
    CompanyNotFound {
        /// The company id that was looked up.
        company_id: String,
    },

    /// No employee matched the given id or user id.
    #[error("Employee not found: {reference}")]
    EmployeeNotFound {
        /// The employee id or user id that was looked up.
        reference: String,
    },

    /// The employee has been terminated.
    #[error("Employee '{employee_id}' is not active")]
    EmployeeInactive {
        /// The inactive employee's id.
        employee_id: String,
    },

    /// Another employee is already paired with this user.
    #[error("User '{user_id}' already has an employee record")]
    DuplicateEmployee {
        /// The user id that is already taken.
        user_id: String,
    },

    /// An input field failed validation.
    #[error("Invalid field '{field}': {message}")]
    InvalidField {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A check-in already exists for today.
    #[error("Already checked in today.")]
    AlreadyCheckedIn,

    /// The hard daily check-in cutoff has passed.
    #[error("Check-in is closed for today (cutoff {cutoff})")]
    CheckInClosed {
        /// The cutoff time of day, as HH:MM.
        cutoff: String,
    },

    /// Check-out was attempted without a check-in.
    #[error("You have not checked in today.")]
    NotCheckedIn,

    /// A check-out already exists for today.
    #[error("Already checked out today.")]
    AlreadyCheckedOut,

    /// Check-out was attempted before the minimum work hours elapsed.
    #[error("Minimum work hours not met: worked {worked} of {minimum} hours")]
    MinimumWorkHoursNotMet {
        /// Hours worked since check-in.
        worked: Decimal,
        /// The company's configured minimum.
        minimum: Decimal,
    },

    /// The latest allowed check-out time has passed.
    #[error("Check-out is closed for today (latest {latest})")]
    CheckOutClosed {
        /// The latest allowed check-out time, as HH:MM.
        latest: String,
    },

    /// A leave request ends before it starts.
    #[error("End date {end_date} cannot be before start date {start_date}")]
    InvalidDateRange {
        /// The requested start date.
        start_date: NaiveDate,
        /// The requested end date.
        end_date: NaiveDate,
    },

    /// A leave request covers more days than any single leave may.
    #[error("Leave of {requested} days exceeds the maximum of {max} days per request")]
    LeaveTooLong {
        /// Days in the request.
        requested: i64,
        /// The per-request maximum.
        max: i64,
    },

    /// The leave type is restricted to a gender the employee does not have.
    #[error("{leave_type} leave is only available to female employees")]
    LeaveTypeRestricted {
        /// The restricted leave type.
        leave_type: LeaveType,
    },

    /// The company has no policy for the requested leave type.
    #[error("Leave policy not found for {leave_type}")]
    LeavePolicyNotFound {
        /// The leave type without a policy.
        leave_type: LeaveType,
    },

    /// The request would exceed the leave quota for the current period.
    #[error(
        "Leave quota exceeded for {leave_type}: used {used} + requested {requested} exceeds limit {limit}"
    )]
    LeaveQuotaExceeded {
        /// The leave type.
        leave_type: LeaveType,
        /// Approved days already taken this period.
        used: i64,
        /// Days in the new request.
        requested: i64,
        /// Days allowed per period.
        limit: u32,
    },

    /// The employee already has a pending leave request.
    #[error("You already have a pending leave request")]
    PendingLeaveExists {
        /// The id of the pending leave.
        leave_id: Uuid,
    },

    /// No leave exists with the given id.
    #[error("Leave not found: {leave_id}")]
    LeaveNotFound {
        /// The leave id that was looked up.
        leave_id: Uuid,
    },

    /// The leave cannot move from its current status.
    #[error("Cannot change leave from {from} to {to}")]
    InvalidLeaveTransition {
        /// The current status.
        from: LeaveStatus,
        /// The requested status.
        to: LeaveStatus,
    },

    /// No payslip exists with the given id.
    #[error("Salary not found: {salary_id}")]
    SalaryNotFound {
        /// The salary id that was looked up.
        salary_id: Uuid,
    },

    /// A payslip already exists for the employee and period.
    #[error("Salary for employee '{employee_id}' already exists for {month}/{year}")]
    DuplicateSalary {
        /// The employee id.
        employee_id: String,
        /// The month (1-12).
        month: u32,
        /// The year.
        year: i32,
    },

    /// The payslip has been paid and can no longer change.
    #[error("Salary {salary_id} is already paid")]
    SalaryAlreadyPaid {
        /// The paid salary id.
        salary_id: Uuid,
    },
}

impl PolicyError {
    /// Shorthand for [`PolicyError::InvalidField`].
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        PolicyError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return PolicyError.
pub type PolicyResult<T> = Result<T, PolicyError>;
