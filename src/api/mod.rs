//! HTTP API module for the HR Policy Engine.
//!
//! This module provides the REST API endpoints for employees, attendance,
//! leave, payroll and company settings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceRequest, EmployeeRequest, LeaveRequestBody, PeriodQuery, SalaryRequest,
    SalaryUpdateRequest,
};
pub use response::{ApiError, ApiErrorResponse, ApiResponse};
pub use state::AppState;
