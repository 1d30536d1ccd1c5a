//! HTTP request handlers for the HR Policy Engine API.
//!
//! This module contains the handler functions for all API endpoints.
//! Every handler tags its log lines with a fresh correlation id, reads the
//! current instant from [`AppState::now`] and maps [`PolicyError`]s through
//! [`ApiErrorResponse`].

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PolicyError;
use crate::models::{CompanySettings, LeavePolicy};
use crate::service::{self, NewLeave};

use super::request::{
    AttendanceRequest, EmployeeRequest, LeaveRequestBody, PeriodQuery, SalaryRequest,
    SalaryUpdateRequest,
};
use super::response::{ApiError, ApiErrorResponse, ApiResponse};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/employees", post(create_employee_handler))
        .route("/employees/:id", get(get_employee_handler))
        .route("/employees/:id/terminate", post(terminate_employee_handler))
        .route("/employees/:id/attendance", get(attendance_report_handler))
        .route("/employees/:id/leaves", get(employee_leaves_handler))
        .route("/employees/:id/leave-balances", get(leave_balances_handler))
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route("/leaves", post(create_leave_handler))
        .route("/leaves/:id/approve", post(approve_leave_handler))
        .route("/leaves/:id/reject", post(reject_leave_handler))
        .route("/leaves/:id/cancel", post(cancel_leave_handler))
        .route("/salaries", post(create_salary_handler))
        .route(
            "/salaries/:id",
            get(get_salary_handler).put(update_salary_handler),
        )
        .route("/salaries/:id/pay", post(pay_salary_handler))
        .route("/companies/:id", get(get_company_handler))
        .route("/companies/:id/settings", put(update_settings_handler))
        .route("/companies/:id/leave-policies", put(upsert_leave_policy_handler))
        .route("/companies/:id/activity", get(activity_handler))
        .with_state(state)
}

/// Wraps `data` in the success envelope.
fn respond<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiResponse::new(message, data)),
    )
        .into_response()
}

/// Logs a rejected request and converts the error for the client.
fn reject(correlation_id: Uuid, err: PolicyError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    err.into()
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Parses a UUID path segment.
fn parse_id(correlation_id: Uuid, field: &str, raw: &str) -> Result<Uuid, ApiErrorResponse> {
    Uuid::parse_str(raw).map_err(|_| {
        reject(
            correlation_id,
            PolicyError::invalid_field(field, format!("'{}' is not a valid id", raw)),
        )
    })
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee registration");

    let request = json_body(correlation_id, payload)?;
    let employee = service::register_employee(state.store(), request.into(), state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, employee_id = %employee.id, "Employee registered");
    Ok(respond(StatusCode::CREATED, "Employee registered", employee))
}

async fn get_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let employee = service::get_employee(state.store(), &employee_id)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Employee", employee))
}

async fn terminate_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing termination");

    let employee = service::terminate_employee(state.store(), &employee_id, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Employee terminated", employee))
}

async fn check_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing check-in");

    let request = json_body(correlation_id, payload)?;
    let user_id = request.user_id().map_err(|e| reject(correlation_id, e))?;
    let record = service::check_in(state.store(), user_id, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        status = ?record.status,
        "Check-in accepted"
    );
    Ok(respond(StatusCode::OK, "Checked in", record))
}

async fn check_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing check-out");

    let request = json_body(correlation_id, payload)?;
    let user_id = request.user_id().map_err(|e| reject(correlation_id, e))?;
    let record = service::check_out(state.store(), user_id, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        "Check-out accepted"
    );
    Ok(respond(StatusCode::OK, "Checked out", record))
}

async fn attendance_report_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(period) = query.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;

    let report =
        service::attendance_report(state.store(), &employee_id, period.month, period.year)
            .await
            .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Attendance report", report))
}

async fn create_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRequestBody>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave request");

    let request = json_body(correlation_id, payload)?;
    let new = NewLeave::try_from(request).map_err(|e| reject(correlation_id, e))?;
    let leave = service::request_leave(state.store(), new, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        leave_id = %leave.id,
        employee_id = %leave.employee_id,
        "Leave request filed"
    );
    Ok(respond(StatusCode::CREATED, "Leave requested", leave))
}

async fn approve_leave_handler(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let leave_id = parse_id(correlation_id, "leave_id", &leave_id)?;
    let leave = service::approve_leave(state.store(), leave_id, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Leave approved", leave))
}

async fn reject_leave_handler(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let leave_id = parse_id(correlation_id, "leave_id", &leave_id)?;
    let leave = service::reject_leave(state.store(), leave_id, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Leave rejected", leave))
}

async fn cancel_leave_handler(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let leave_id = parse_id(correlation_id, "leave_id", &leave_id)?;
    let leave = service::cancel_leave(state.store(), leave_id, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Leave cancelled", leave))
}

async fn employee_leaves_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let leaves = service::employee_leaves(state.store(), &employee_id)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Leaves", leaves))
}

async fn leave_balances_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let balances = service::employee_leave_balances(state.store(), &employee_id, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Leave balances", balances))
}

async fn create_salary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip generation");

    let request = json_body(correlation_id, payload)?;
    let salary = service::generate_salary(state.store(), request.into(), state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        salary_id = %salary.id,
        total = %salary.total,
        "Payslip generated"
    );
    Ok(respond(StatusCode::CREATED, "Salary generated", salary))
}

async fn get_salary_handler(
    State(state): State<AppState>,
    Path(salary_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let salary_id = parse_id(correlation_id, "salary_id", &salary_id)?;
    let salary = service::get_salary(state.store(), salary_id)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Salary", salary))
}

async fn update_salary_handler(
    State(state): State<AppState>,
    Path(salary_id): Path<String>,
    payload: Result<Json<SalaryUpdateRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let salary_id = parse_id(correlation_id, "salary_id", &salary_id)?;
    let request = json_body(correlation_id, payload)?;

    let salary = service::update_salary(state.store(), salary_id, request.into(), state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Salary updated", salary))
}

async fn pay_salary_handler(
    State(state): State<AppState>,
    Path(salary_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let salary_id = parse_id(correlation_id, "salary_id", &salary_id)?;
    let salary = service::pay_salary(state.store(), salary_id, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, salary_id = %salary.id, "Payslip paid");
    Ok(respond(StatusCode::OK, "Salary paid", salary))
}

async fn get_company_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let company = service::get_company(state.store(), &company_id)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Company", company))
}

async fn update_settings_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    payload: Result<Json<CompanySettings>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let settings = json_body(correlation_id, payload)?;
    let company = service::update_settings(state.store(), &company_id, settings, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Settings updated", company))
}

async fn upsert_leave_policy_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    payload: Result<Json<LeavePolicy>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let policy = json_body(correlation_id, payload)?;
    let company = service::upsert_leave_policy(state.store(), &company_id, policy, state.now())
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Leave policy saved", company))
}

async fn activity_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let entries = service::activity_log(state.store(), &company_id)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(respond(StatusCode::OK, "Activity", entries))
}
