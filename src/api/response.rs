//! Response types for the HR Policy Engine API.
//!
//! Successful calls return `{ "message": ..., "data": ... }`; failures
//! return an [`ApiError`] body with the status code chosen by
//! [`ApiErrorResponse`].

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::PolicyError;

/// Success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Short human-readable summary.
    pub message: String,
    /// The resource or result.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` with a summary message.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response with an explicit status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 error response.
    pub fn bad_request(error: ApiError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

/// Stable error code for each variant.
fn error_code(error: &PolicyError) -> &'static str {
    match error {
        PolicyError::ConfigNotFound { .. } | PolicyError::ConfigParseError { .. } => {
            "CONFIG_ERROR"
        }
        PolicyError::Unauthenticated => "UNAUTHENTICATED",
        PolicyError::CompanyNotFound { .. } => "COMPANY_NOT_FOUND",
        PolicyError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
        PolicyError::EmployeeInactive { .. } => "EMPLOYEE_INACTIVE",
        PolicyError::DuplicateEmployee { .. } => "DUPLICATE_EMPLOYEE",
        PolicyError::InvalidField { .. } => "VALIDATION_ERROR",
        PolicyError::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
        PolicyError::CheckInClosed { .. } => "CHECK_IN_CLOSED",
        PolicyError::NotCheckedIn => "NOT_CHECKED_IN",
        PolicyError::AlreadyCheckedOut => "ALREADY_CHECKED_OUT",
        PolicyError::MinimumWorkHoursNotMet { .. } => "MINIMUM_WORK_HOURS_NOT_MET",
        PolicyError::CheckOutClosed { .. } => "CHECK_OUT_CLOSED",
        PolicyError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
        PolicyError::LeaveTooLong { .. } => "LEAVE_TOO_LONG",
        PolicyError::LeaveTypeRestricted { .. } => "LEAVE_TYPE_RESTRICTED",
        PolicyError::LeavePolicyNotFound { .. } => "LEAVE_POLICY_NOT_FOUND",
        PolicyError::LeaveQuotaExceeded { .. } => "LEAVE_QUOTA_EXCEEDED",
        PolicyError::PendingLeaveExists { .. } => "PENDING_LEAVE_EXISTS",
        PolicyError::LeaveNotFound { .. } => "LEAVE_NOT_FOUND",
        PolicyError::InvalidLeaveTransition { .. } => "INVALID_LEAVE_TRANSITION",
        PolicyError::SalaryNotFound { .. } => "SALARY_NOT_FOUND",
        PolicyError::DuplicateSalary { .. } => "DUPLICATE_SALARY",
        PolicyError::SalaryAlreadyPaid { .. } => "SALARY_ALREADY_PAID",
    }
}

fn status_for(error: &PolicyError) -> StatusCode {
    match error {
        PolicyError::ConfigNotFound { .. } | PolicyError::ConfigParseError { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        PolicyError::Unauthenticated => StatusCode::UNAUTHORIZED,
        PolicyError::CompanyNotFound { .. }
        | PolicyError::EmployeeNotFound { .. }
        | PolicyError::LeavePolicyNotFound { .. }
        | PolicyError::LeaveNotFound { .. }
        | PolicyError::SalaryNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl From<PolicyError> for ApiErrorResponse {
    fn from(err: PolicyError) -> Self {
        let status = status_for(&err);
        let code = error_code(&err);

        if status.is_server_error() {
            error!(code, error = %err, "Internal error");
            return Self::new(
                status,
                ApiError::with_details(code, "Internal server error", err.to_string()),
            );
        }

        Self::new(status, ApiError::new(code, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveType;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_response_envelope() {
        let body = ApiResponse::new("Checked in", serde_json::json!({ "status": "LATE" }));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "Checked in");
        assert_eq!(json["data"]["status"], "LATE");
    }

    #[test]
    fn test_policy_violation_is_bad_request() {
        let api_error: ApiErrorResponse = PolicyError::AlreadyCheckedIn.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "ALREADY_CHECKED_IN");
        assert_eq!(api_error.error.message, "Already checked in today.");
    }

    #[test]
    fn test_overlong_leave_is_bad_request() {
        let api_error: ApiErrorResponse = PolicyError::LeaveTooLong {
            requested: 400,
            max: 366,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "LEAVE_TOO_LONG");
        assert_eq!(
            api_error.error.message,
            "Leave of 400 days exceeds the maximum of 366 days per request"
        );
    }

    #[test]
    fn test_missing_user_is_unauthorized() {
        let api_error: ApiErrorResponse = PolicyError::Unauthenticated.into();
        assert_eq!(api_error.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_missing_leave_policy_is_not_found() {
        let api_error: ApiErrorResponse = PolicyError::LeavePolicyNotFound {
            leave_type: LeaveType::Maternity,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "LEAVE_POLICY_NOT_FOUND");
    }

    #[test]
    fn test_config_error_is_internal_with_details() {
        let api_error: ApiErrorResponse = PolicyError::ConfigNotFound {
            path: "config/server.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.message, "Internal server error");
        assert!(api_error.error.details.unwrap().contains("server.yaml"));
    }
}
