//! Pay calculation.
//!
//! This module turns a set of [`PayParameters`] into a [`PayBreakdown`]:
//!
//! 1. `base_salary = base_hours × hourly_rate`
//! 2. `overtime_pay = overtime_hours × hourly_rate × 1.5`
//! 3. `performance_bonus = base_salary × 0.1`
//! 4. `net_salary = max(base_salary + overtime_pay + performance_bonus − deductions, 0)`
//!
//! The arithmetic is plain `f64` evaluated in exactly that order, so results
//! are reproducible bit for bit.

use crate::error::{ServiceError, ServiceResult};
use crate::models::{PayBreakdown, PayParameters};

use super::rounding::round_currency;

/// Multiplier applied to the hourly rate for overtime hours.
pub const OVERTIME_MULTIPLIER: f64 = 1.5;

/// Share of the base salary paid as a performance bonus.
pub const PERFORMANCE_BONUS_RATE: f64 = 0.1;

/// Computes the unrounded pay breakdown.
///
/// Every input must be a finite, non-negative number; otherwise a
/// `Validation` error naming the first offending field is returned. Inputs
/// large enough to overflow any computed amount are rejected the same way,
/// naming the amount that overflowed. Net salary is floored at zero so
/// deductions never produce a liability.
///
/// # Examples
///
/// ```
/// use payroll_service::calculation::compute;
/// use payroll_service::models::PayParameters;
///
/// let breakdown = compute(&PayParameters::new(160.0, 100.0).with_overtime(10.0)).unwrap();
/// assert_eq!(breakdown.base_salary, 16000.0);
/// assert_eq!(breakdown.overtime_pay, 1500.0);
/// assert_eq!(breakdown.performance_bonus, 1600.0);
/// assert_eq!(breakdown.net_salary, 19100.0);
///
/// assert!(compute(&PayParameters::new(-10.0, 25.0)).is_err());
/// ```
pub fn compute(params: &PayParameters) -> ServiceResult<PayBreakdown> {
    params.validate()?;

    let base_salary = params.base_hours * params.hourly_rate;
    let overtime_pay = params.overtime_hours * params.hourly_rate * OVERTIME_MULTIPLIER;
    let performance_bonus = base_salary * PERFORMANCE_BONUS_RATE;
    let raw_net = base_salary + overtime_pay + performance_bonus - params.deductions;

    for (field, amount) in [
        ("base_salary", base_salary),
        ("overtime_pay", overtime_pay),
        ("performance_bonus", performance_bonus),
        ("net_salary", raw_net),
    ] {
        if !amount.is_finite() {
            return Err(ServiceError::validation(field, "result out of range"));
        }
    }

    Ok(PayBreakdown {
        base_salary,
        overtime_pay,
        performance_bonus,
        net_salary: raw_net.max(0.0),
        deduction: params.deductions,
    })
}

/// Computes the pay breakdown with every derived amount rounded to cents.
///
/// This is the form returned to HTTP callers and the form whose
/// `net_salary` is stored on salary records. `deduction` is echoed as given.
pub fn compute_rounded(params: &PayParameters) -> ServiceResult<PayBreakdown> {
    let breakdown = compute(params)?;

    Ok(PayBreakdown {
        base_salary: round_currency(breakdown.base_salary),
        overtime_pay: round_currency(breakdown.overtime_pay),
        performance_bonus: round_currency(breakdown.performance_bonus),
        net_salary: round_currency(breakdown.net_salary),
        deduction: breakdown.deduction,
    })
}
