//! Activity log entries recorded after state-changing operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in a company's activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The company the activity belongs to.
    pub company_id: String,
    /// The employee acted on, if any.
    pub employee_id: Option<String>,
    /// Short machine-friendly action name (e.g. "check_in").
    pub action: String,
    /// Human-readable description.
    pub detail: String,
    /// When the activity happened.
    pub at: DateTime<Utc>,
}

impl ActivityEntry {
    /// Creates an entry for an employee-scoped action.
    pub fn for_employee(
        company_id: &str,
        employee_id: &str,
        action: &str,
        detail: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id: company_id.to_string(),
            employee_id: Some(employee_id.to_string()),
            action: action.to_string(),
            detail: detail.into(),
            at,
        }
    }

    /// Creates an entry for a company-wide action.
    pub fn for_company(
        company_id: &str,
        action: &str,
        detail: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id: company_id.to_string(),
            employee_id: None,
            action: action.to_string(),
            detail: detail.into(),
            at,
        }
    }
}
