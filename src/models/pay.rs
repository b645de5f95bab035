//! Pay calculation input and output types.

use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// The four inputs of a pay calculation.
///
/// `overtime_hours` and `deductions` default to zero when omitted from JSON.
///
/// # Example
///
/// ```
/// use payroll_service::models::PayParameters;
///
/// let params = PayParameters::new(160.0, 100.0);
/// assert_eq!(params.overtime_hours, 0.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayParameters {
    /// Regular hours worked.
    pub base_hours: f64,
    /// Pay per regular hour.
    pub hourly_rate: f64,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: f64,
    /// Amount deducted from gross pay.
    #[serde(default)]
    pub deductions: f64,
}

impl PayParameters {
    /// Creates parameters with no overtime and no deductions.
    pub fn new(base_hours: f64, hourly_rate: f64) -> Self {
        Self {
            base_hours,
            hourly_rate,
            overtime_hours: 0.0,
            deductions: 0.0,
        }
    }

    /// Sets the overtime hours.
    pub fn with_overtime(mut self, overtime_hours: f64) -> Self {
        self.overtime_hours = overtime_hours;
        self
    }

    /// Sets the deductions.
    pub fn with_deductions(mut self, deductions: f64) -> Self {
        self.deductions = deductions;
        self
    }

    /// Checks every field is a finite, non-negative number.
    ///
    /// Fields are checked in declaration order and the first offending
    /// field is reported.
    pub fn validate(&self) -> ServiceResult<()> {
        let fields = [
            ("base_hours", self.base_hours),
            ("hourly_rate", self.hourly_rate),
            ("overtime_hours", self.overtime_hours),
            ("deductions", self.deductions),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ServiceError::validation(field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(ServiceError::validation(
                    field,
                    "must be greater than or equal to 0",
                ));
            }
        }
        Ok(())
    }
}

/// The five components of a computed salary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// `base_hours × hourly_rate`.
    pub base_salary: f64,
    /// `overtime_hours × hourly_rate × 1.5`.
    pub overtime_pay: f64,
    /// Ten percent of the base salary.
    pub performance_bonus: f64,
    /// Gross pay less deductions, never below zero.
    pub net_salary: f64,
    /// The deductions that were applied.
    pub deduction: f64,
}
