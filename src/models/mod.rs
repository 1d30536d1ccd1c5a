//! Core data models for the HR Policy Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod activity;
mod attendance;
mod company;
mod employee;
mod leave;
mod salary;

pub use activity::ActivityEntry;
pub use attendance::{Attendance, AttendanceStatus, AttendanceSummary, hours_between};
pub use company::{AttendanceSettings, Company, CompanySettings, PayrollSettings, hhmm};
pub use employee::{Employee, EmployeeRole, Gender};
pub use leave::{Leave, LeavePolicy, LeaveStatus, LeaveType, ResetFrequency, inclusive_days};
pub use salary::{Salary, SalaryStatus};
