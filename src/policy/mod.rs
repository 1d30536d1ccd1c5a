//! Policy rules for the HR Policy Engine.
//!
//! This module contains the pure rule functions: the GMT+7 local clock,
//! the attendance window policy, leave quota accounting and the payroll
//! calculator. None of them touch storage; callers pass in the records
//! and the current instant.

mod attendance;
mod clock;
mod leave_quota;
mod payroll;

pub use attendance::{
    CHECK_IN_CUTOFF_MINUTE, CheckInOutcome, CheckOutOutcome, evaluate_check_in,
    evaluate_check_out,
};
pub use clock::{
    Clock, FixedClock, LOCAL_UTC_OFFSET_HOURS, SystemClock, from_local, local_date,
    local_datetime, local_time, minute_of_day,
};
pub use leave_quota::{
    LeaveBalance, LeaveRequest, MAX_LEAVE_DAYS, QuotaCheck, ensure_no_pending, leave_balances,
    period_start, used_days, validate_leave_request,
};
pub use payroll::{
    MAX_AMOUNT, PayrollBreakdown, PayrollInput, calculate_payroll, count_attendance,
    validate_amount, validate_period,
};
