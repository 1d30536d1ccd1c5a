//! Stateful operations over the [`Store`](crate::store::Store).
//!
//! Each operation resolves the records it needs, applies the pure rules in
//! [`policy`](crate::policy), writes the result and appends an activity
//! entry, all under one write guard.

mod attendance;
mod company;
mod employee;
mod leave;
mod payroll;

pub use attendance::{AttendanceReport, attendance_report, check_in, check_out};
pub use company::{activity_log, get_company, update_settings, upsert_leave_policy};
pub use employee::{NewEmployee, get_employee, register_employee, terminate_employee};
pub use leave::{
    LeaveRequester, NewLeave, approve_leave, cancel_leave, employee_leave_balances,
    employee_leaves, reject_leave, request_leave,
};
pub use payroll::{NewSalary, SalaryUpdate, generate_salary, get_salary, pay_salary, update_salary};
