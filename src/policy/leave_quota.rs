//! Leave quota accounting.
//!
//! [`validate_leave_request`] is the single validation routine for new
//! leave requests. Both the self-service path (employee identified by
//! user id) and the admin path (employee id given directly) call it, so
//! validation order and arithmetic cannot drift between them.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};
use crate::models::{
    Employee, Leave, LeavePolicy, LeaveStatus, LeaveType, ResetFrequency, inclusive_days,
};

use super::clock::local_date;

/// Longest leave, in inclusive days, a single request may cover.
///
/// Approval writes one attendance row per covered day under the store's
/// write lock, so the span is bounded for every leave type.
pub const MAX_LEAVE_DAYS: i64 = 366;

/// A new leave request, before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequest {
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
}

/// What the quota check found for an accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaCheck {
    /// Days in the request.
    pub requested_days: i64,
    /// Approved days already used this period (0 for exempt types).
    pub used_days: i64,
    /// The policy limit, or `None` for quota-exempt types.
    pub allowed_days: Option<u32>,
    /// Start of the current quota period, or `None` for quota-exempt types.
    pub period_start: Option<NaiveDate>,
}

/// Used and remaining days for one leave policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The leave type.
    pub leave_type: LeaveType,
    /// When the quota resets.
    pub frequency: ResetFrequency,
    /// Days allowed per period.
    pub allowed_days: u32,
    /// Approved days used in the current period.
    pub used_days: i64,
    /// Days still available (never negative).
    pub remaining_days: i64,
    /// First day of the current period.
    pub period_start: NaiveDate,
}

/// First day of the quota period containing `today`.
///
/// # Examples
///
/// ```
/// use hr_policy_engine::models::ResetFrequency;
/// use hr_policy_engine::policy::period_start;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();
/// assert_eq!(period_start(ResetFrequency::Monthly, today), NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
/// assert_eq!(period_start(ResetFrequency::Yearly, today), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// ```
pub fn period_start(frequency: ResetFrequency, today: NaiveDate) -> NaiveDate {
    let days_into_period = match frequency {
        ResetFrequency::Monthly => today.day0(),
        ResetFrequency::Yearly => today.ordinal0(),
    };
    today - Duration::days(i64::from(days_into_period))
}

/// Sums the inclusive day counts of approved leaves of `leave_type` that
/// start on or after `since`.
///
/// A leave is counted in full even if it extends past the period end.
pub fn used_days(leaves: &[Leave], leave_type: LeaveType, since: NaiveDate) -> i64 {
    leaves
        .iter()
        .filter(|l| {
            l.status == LeaveStatus::Approved && l.leave_type == leave_type && l.start_date >= since
        })
        .map(Leave::day_count)
        .sum()
}

/// Rejects a new request while the employee has any pending leave.
pub fn ensure_no_pending(leaves: &[Leave]) -> PolicyResult<()> {
    match leaves.iter().find(|l| l.status == LeaveStatus::Pending) {
        Some(pending) => Err(PolicyError::PendingLeaveExists {
            leave_id: pending.id,
        }),
        None => Ok(()),
    }
}

/// Validates a new leave request against the company's policy.
///
/// `existing` must be the employee's own leaves. `policy` is the company's
/// policy for `request.leave_type`, if one exists.
///
/// # Validation order
///
/// 1. End date before start date is rejected.
/// 2. Female-only types requested by anyone else are rejected.
/// 3. Requests longer than [`MAX_LEAVE_DAYS`] are rejected.
/// 4. Quota-exempt types (UNPAID) are accepted here.
/// 5. A missing policy is rejected.
/// 6. Approved days of this type in the current period plus the requested
///    days must not exceed the policy limit.
///
/// # Examples
///
/// ```
/// use hr_policy_engine::models::{Employee, EmployeeRole, Gender, LeavePolicy, LeaveType, ResetFrequency};
/// use hr_policy_engine::policy::{LeaveRequest, validate_leave_request};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     user_id: "user_001".to_string(),
///     company_id: "acme".to_string(),
///     department_id: None,
///     name: "An Pham".to_string(),
///     role: EmployeeRole::Staff,
///     gender: Gender::Male,
///     base_salary: Decimal::from(5_000_000),
///     is_active: true,
///     join_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// };
/// let policy = LeavePolicy {
///     leave_type: LeaveType::Annual,
///     allowed_days: 12,
///     frequency: ResetFrequency::Yearly,
/// };
/// let request = LeaveRequest {
///     leave_type: LeaveType::Annual,
///     start_date: NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
/// };
/// let now = Utc.with_ymd_and_hms(2026, 3, 2, 2, 0, 0).unwrap();
///
/// let check = validate_leave_request(&employee, Some(&policy), &[], &request, now).unwrap();
/// assert_eq!(check.requested_days, 5);
/// assert_eq!(check.used_days, 0);
/// ```
pub fn validate_leave_request(
    employee: &Employee,
    policy: Option<&LeavePolicy>,
    existing: &[Leave],
    request: &LeaveRequest,
    now: DateTime<Utc>,
) -> PolicyResult<QuotaCheck> {
    if request.end_date < request.start_date {
        return Err(PolicyError::InvalidDateRange {
            start_date: request.start_date,
            end_date: request.end_date,
        });
    }

    if request.leave_type.is_female_only() && !employee.is_female() {
        return Err(PolicyError::LeaveTypeRestricted {
            leave_type: request.leave_type,
        });
    }

    let requested_days = inclusive_days(request.start_date, request.end_date);
    if requested_days > MAX_LEAVE_DAYS {
        return Err(PolicyError::LeaveTooLong {
            requested: requested_days,
            max: MAX_LEAVE_DAYS,
        });
    }

    if request.leave_type.is_quota_exempt() {
        return Ok(QuotaCheck {
            requested_days,
            used_days: 0,
            allowed_days: None,
            period_start: None,
        });
    }

    let policy = policy.ok_or(PolicyError::LeavePolicyNotFound {
        leave_type: request.leave_type,
    })?;

    let since = period_start(policy.frequency, local_date(now));
    let used = used_days(existing, request.leave_type, since);

    if used + requested_days > i64::from(policy.allowed_days) {
        return Err(PolicyError::LeaveQuotaExceeded {
            leave_type: request.leave_type,
            used,
            requested: requested_days,
            limit: policy.allowed_days,
        });
    }

    Ok(QuotaCheck {
        requested_days,
        used_days: used,
        allowed_days: Some(policy.allowed_days),
        period_start: Some(since),
    })
}

/// Computes the current balance for each of the company's policies.
pub fn leave_balances(
    policies: &[LeavePolicy],
    existing: &[Leave],
    now: DateTime<Utc>,
) -> Vec<LeaveBalance> {
    let today = local_date(now);
    policies
        .iter()
        .map(|policy| {
            let since = period_start(policy.frequency, today);
            let used = used_days(existing, policy.leave_type, since);
            LeaveBalance {
                leave_type: policy.leave_type,
                frequency: policy.frequency,
                allowed_days: policy.allowed_days,
                used_days: used,
                remaining_days: (i64::from(policy.allowed_days) - used).max(0),
                period_start: since,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRole, Gender};
    use crate::policy::clock::from_local;
    use chrono::NaiveDateTime;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now_local(s: &str) -> DateTime<Utc> {
        from_local(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    fn employee(gender: Gender) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            user_id: "user_001".to_string(),
            company_id: "acme".to_string(),
            department_id: None,
            name: "Test Employee".to_string(),
            role: EmployeeRole::Staff,
            gender,
            base_salary: Decimal::from(5_000_000),
            is_active: true,
            join_date: date(2024, 1, 1),
        }
    }

    fn policy(leave_type: LeaveType, allowed_days: u32, frequency: ResetFrequency) -> LeavePolicy {
        LeavePolicy {
            leave_type,
            allowed_days,
            frequency,
        }
    }

    fn leave(
        leave_type: LeaveType,
        start: NaiveDate,
        end: NaiveDate,
        status: LeaveStatus,
    ) -> Leave {
        Leave {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            leave_type,
            start_date: start,
            end_date: end,
            reason: "test".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    fn request(leave_type: LeaveType, start: NaiveDate, end: NaiveDate) -> LeaveRequest {
        LeaveRequest {
            leave_type,
            start_date: start,
            end_date: end,
        }
    }

    fn five_approved_annual_days() -> Vec<Leave> {
        vec![
            leave(LeaveType::Annual, date(2026, 2, 2), date(2026, 2, 4), LeaveStatus::Approved),
            leave(LeaveType::Annual, date(2026, 3, 9), date(2026, 3, 10), LeaveStatus::Approved),
        ]
    }

    #[test]
    fn test_annual_quota_rejects_request_over_limit() {
        let annual = policy(LeaveType::Annual, 12, ResetFrequency::Yearly);
        let existing = five_approved_annual_days();

        let result = validate_leave_request(
            &employee(Gender::Male),
            Some(&annual),
            &existing,
            &request(LeaveType::Annual, date(2026, 6, 1), date(2026, 6, 8)),
            now_local("2026-05-15 10:00:00"),
        );

        match result {
            Err(PolicyError::LeaveQuotaExceeded {
                used,
                requested,
                limit,
                ..
            }) => {
                assert_eq!(used, 5);
                assert_eq!(requested, 8);
                assert_eq!(limit, 12);
            }
            other => panic!("Expected LeaveQuotaExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_annual_quota_accepts_request_up_to_limit() {
        let annual = policy(LeaveType::Annual, 12, ResetFrequency::Yearly);
        let existing = five_approved_annual_days();

        let check = validate_leave_request(
            &employee(Gender::Male),
            Some(&annual),
            &existing,
            &request(LeaveType::Annual, date(2026, 6, 1), date(2026, 6, 7)),
            now_local("2026-05-15 10:00:00"),
        )
        .unwrap();

        assert_eq!(check.used_days, 5);
        assert_eq!(check.requested_days, 7);
        assert_eq!(check.allowed_days, Some(12));
        assert_eq!(check.period_start, Some(date(2026, 1, 1)));
    }

    #[test]
    fn test_end_before_start_is_rejected_first() {
        // Checked before gender and policy lookup.
        let result = validate_leave_request(
            &employee(Gender::Male),
            None,
            &[],
            &request(LeaveType::Maternity, date(2026, 6, 8), date(2026, 6, 1)),
            now_local("2026-05-15 10:00:00"),
        );
        assert!(matches!(result, Err(PolicyError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_maternity_rejected_for_non_female_regardless_of_quota() {
        let maternity = policy(LeaveType::Maternity, 180, ResetFrequency::Yearly);
        for gender in [Gender::Male, Gender::Other] {
            let result = validate_leave_request(
                &employee(gender),
                Some(&maternity),
                &[],
                &request(LeaveType::Maternity, date(2026, 6, 1), date(2026, 6, 1)),
                now_local("2026-05-15 10:00:00"),
            );
            assert!(matches!(
                result,
                Err(PolicyError::LeaveTypeRestricted {
                    leave_type: LeaveType::Maternity
                })
            ));
        }
    }

    #[test]
    fn test_maternity_accepted_for_female() {
        let maternity = policy(LeaveType::Maternity, 180, ResetFrequency::Yearly);
        let check = validate_leave_request(
            &employee(Gender::Female),
            Some(&maternity),
            &[],
            &request(LeaveType::Maternity, date(2026, 6, 1), date(2026, 8, 29)),
            now_local("2026-05-15 10:00:00"),
        )
        .unwrap();
        assert_eq!(check.requested_days, 90);
    }

    #[test]
    fn test_overlong_unpaid_leave_is_rejected() {
        let result = validate_leave_request(
            &employee(Gender::Male),
            None,
            &[],
            &request(LeaveType::Unpaid, date(2026, 1, 1), date(9999, 12, 31)),
            now_local("2026-01-01 10:00:00"),
        );
        match result {
            Err(PolicyError::LeaveTooLong { max, .. }) => assert_eq!(max, MAX_LEAVE_DAYS),
            other => panic!("Expected LeaveTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_leave_span_limit_is_inclusive() {
        let sick = policy(LeaveType::Sick, 1000, ResetFrequency::Yearly);
        let start = date(2026, 1, 1);

        let check = validate_leave_request(
            &employee(Gender::Male),
            Some(&sick),
            &[],
            &request(LeaveType::Sick, start, date(2027, 1, 1)),
            now_local("2026-01-01 10:00:00"),
        )
        .unwrap();
        assert_eq!(check.requested_days, MAX_LEAVE_DAYS);

        let result = validate_leave_request(
            &employee(Gender::Male),
            Some(&sick),
            &[],
            &request(LeaveType::Sick, start, date(2027, 1, 2)),
            now_local("2026-01-01 10:00:00"),
        );
        assert!(matches!(result, Err(PolicyError::LeaveTooLong { .. })));
    }

    #[test]
    fn test_missing_policy_is_rejected() {
        let result = validate_leave_request(
            &employee(Gender::Male),
            None,
            &[],
            &request(LeaveType::Sick, date(2026, 6, 1), date(2026, 6, 1)),
            now_local("2026-05-15 10:00:00"),
        );
        assert!(matches!(
            result,
            Err(PolicyError::LeavePolicyNotFound {
                leave_type: LeaveType::Sick
            })
        ));
    }

    #[test]
    fn test_unpaid_skips_policy_and_quota() {
        let check = validate_leave_request(
            &employee(Gender::Male),
            None,
            &[],
            &request(LeaveType::Unpaid, date(2026, 6, 1), date(2026, 7, 30)),
            now_local("2026-05-15 10:00:00"),
        )
        .unwrap();
        assert_eq!(check.requested_days, 60);
        assert_eq!(check.allowed_days, None);
    }

    #[test]
    fn test_monthly_quota_ignores_previous_month() {
        let sick = policy(LeaveType::Sick, 3, ResetFrequency::Monthly);
        let existing = vec![
            leave(LeaveType::Sick, date(2026, 4, 28), date(2026, 4, 30), LeaveStatus::Approved),
            leave(LeaveType::Sick, date(2026, 5, 4), date(2026, 5, 4), LeaveStatus::Approved),
        ];

        let ok = validate_leave_request(
            &employee(Gender::Male),
            Some(&sick),
            &existing,
            &request(LeaveType::Sick, date(2026, 5, 20), date(2026, 5, 21)),
            now_local("2026-05-15 10:00:00"),
        )
        .unwrap();
        assert_eq!(ok.used_days, 1);
        assert_eq!(ok.period_start, Some(date(2026, 5, 1)));

        let too_many = validate_leave_request(
            &employee(Gender::Male),
            Some(&sick),
            &existing,
            &request(LeaveType::Sick, date(2026, 5, 20), date(2026, 5, 22)),
            now_local("2026-05-15 10:00:00"),
        );
        assert!(matches!(too_many, Err(PolicyError::LeaveQuotaExceeded { .. })));
    }

    #[test]
    fn test_period_start_uses_local_date() {
        // 23:30 on Dec 31 UTC is already Jan 1 in GMT+7.
        let now = chrono::TimeZone::with_ymd_and_hms(&Utc, 2025, 12, 31, 23, 30, 0).unwrap();
        assert_eq!(period_start(ResetFrequency::Yearly, local_date(now)), date(2026, 1, 1));
    }

    #[test]
    fn test_used_days_counts_only_approved_of_same_type() {
        let since = date(2026, 1, 1);
        let existing = vec![
            leave(LeaveType::Annual, date(2026, 2, 2), date(2026, 2, 3), LeaveStatus::Approved),
            leave(LeaveType::Annual, date(2026, 2, 9), date(2026, 2, 13), LeaveStatus::Rejected),
            leave(LeaveType::Annual, date(2026, 3, 2), date(2026, 3, 2), LeaveStatus::Cancelled),
            leave(LeaveType::Annual, date(2026, 4, 1), date(2026, 4, 1), LeaveStatus::Pending),
            leave(LeaveType::Sick, date(2026, 2, 16), date(2026, 2, 17), LeaveStatus::Approved),
            leave(LeaveType::Annual, date(2025, 12, 30), date(2026, 1, 2), LeaveStatus::Approved),
        ];
        assert_eq!(used_days(&existing, LeaveType::Annual, since), 2);
    }

    #[test]
    fn test_pending_leave_blocks_any_new_request() {
        let existing = vec![leave(
            LeaveType::Sick,
            date(2026, 9, 1),
            date(2026, 9, 1),
            LeaveStatus::Pending,
        )];
        let pending_id = existing[0].id;

        match ensure_no_pending(&existing) {
            Err(PolicyError::PendingLeaveExists { leave_id }) => assert_eq!(leave_id, pending_id),
            other => panic!("Expected PendingLeaveExists, got {:?}", other),
        }
        assert!(ensure_no_pending(&five_approved_annual_days()).is_ok());
    }

    #[test]
    fn test_balances_never_negative() {
        let policies = vec![
            policy(LeaveType::Annual, 12, ResetFrequency::Yearly),
            policy(LeaveType::Sick, 2, ResetFrequency::Monthly),
        ];
        let existing = vec![
            leave(LeaveType::Annual, date(2026, 2, 2), date(2026, 2, 4), LeaveStatus::Approved),
            leave(LeaveType::Sick, date(2026, 5, 4), date(2026, 5, 6), LeaveStatus::Approved),
        ];

        let balances = leave_balances(&policies, &existing, now_local("2026-05-15 10:00:00"));

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].used_days, 3);
        assert_eq!(balances[0].remaining_days, 9);
        assert_eq!(balances[1].used_days, 3);
        assert_eq!(balances[1].remaining_days, 0);
        assert_eq!(balances[1].period_start, date(2026, 5, 1));
    }

    proptest! {
        #[test]
        fn prop_requested_days_is_inclusive_span(
            offset in 0i64..2000,
            span in 0i64..MAX_LEAVE_DAYS,
        ) {
            let start = date(2024, 1, 1) + Duration::days(offset);
            let end = start + Duration::days(span);
            let check = validate_leave_request(
                &employee(Gender::Male),
                None,
                &[],
                &request(LeaveType::Unpaid, start, end),
                now_local("2026-05-15 10:00:00"),
            )
            .unwrap();
            prop_assert_eq!(check.requested_days, span + 1);
        }

        #[test]
        fn prop_quota_boundary(used in 0u32..20, requested in 1i64..20, allowed in 0u32..30) {
            let annual = policy(LeaveType::Annual, allowed, ResetFrequency::Yearly);
            let existing: Vec<Leave> = (0..used)
                .map(|i| {
                    let d = date(2026, 1, 5) + Duration::days(i64::from(i));
                    leave(LeaveType::Annual, d, d, LeaveStatus::Approved)
                })
                .collect();
            let start = date(2026, 7, 1);
            let end = start + Duration::days(requested - 1);

            let result = validate_leave_request(
                &employee(Gender::Female),
                Some(&annual),
                &existing,
                &request(LeaveType::Annual, start, end),
                now_local("2026-05-15 10:00:00"),
            );

            prop_assert_eq!(
                result.is_ok(),
                i64::from(used) + requested <= i64::from(allowed)
            );
        }
    }
}
