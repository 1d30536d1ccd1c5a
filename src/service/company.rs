//! Company settings, leave policies and the activity log.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{ActivityEntry, Company, CompanySettings, LeavePolicy, hhmm};
use crate::policy::validate_amount;
use crate::store::Store;

fn validate_settings(settings: &CompanySettings) -> PolicyResult<()> {
    if settings.attendance.minimum_work_hours < Decimal::ZERO {
        return Err(PolicyError::invalid_field(
            "minimum_work_hours",
            "must not be negative",
        ));
    }
    validate_amount(
        "attendance_bonus_rate",
        settings.payroll.attendance_bonus_rate,
    )?;
    validate_amount(
        "late_attendance_penalty_rate",
        settings.payroll.late_attendance_penalty_rate,
    )
}

/// Fetches a company.
pub async fn get_company(store: &Store, company_id: &str) -> PolicyResult<Company> {
    store.read().await.company(company_id).cloned()
}

/// Replaces a company's attendance and payroll settings.
///
/// Existing attendance rows and payslips are not re-evaluated.
pub async fn update_settings(
    store: &Store,
    company_id: &str,
    settings: CompanySettings,
    now: DateTime<Utc>,
) -> PolicyResult<Company> {
    validate_settings(&settings)?;

    let mut tables = store.write().await;
    let company = tables.company_mut(company_id)?;
    company.settings = settings;
    let company = company.clone();

    let attendance = &company.settings.attendance;
    tables.record_activity(ActivityEntry::for_company(
        &company.id,
        "settings_update",
        format!(
            "Check-in until {}, check-out until {}, minimum {} hours",
            hhmm::format(&attendance.check_in_end_time),
            hhmm::format(&attendance.latest_check_out),
            attendance.minimum_work_hours.normalize()
        ),
        now,
    ));

    info!(company_id = %company.id, "Company settings updated");
    Ok(company)
}

/// Inserts or replaces the company's policy for the policy's leave type.
pub async fn upsert_leave_policy(
    store: &Store,
    company_id: &str,
    policy: LeavePolicy,
    now: DateTime<Utc>,
) -> PolicyResult<Company> {
    let mut tables = store.write().await;
    let company = tables.company_mut(company_id)?;
    company.upsert_leave_policy(policy.clone());
    let company = company.clone();

    tables.record_activity(ActivityEntry::for_company(
        &company.id,
        "leave_policy_upsert",
        format!(
            "{} leave: {} days {:?}",
            policy.leave_type, policy.allowed_days, policy.frequency
        ),
        now,
    ));

    info!(
        company_id = %company.id,
        leave_type = %policy.leave_type,
        allowed_days = policy.allowed_days,
        "Leave policy saved"
    );
    Ok(company)
}

/// The company's activity log, oldest first.
pub async fn activity_log(store: &Store, company_id: &str) -> PolicyResult<Vec<ActivityEntry>> {
    let tables = store.read().await;
    tables.company(company_id)?;
    Ok(tables.activity_for(company_id))
}
