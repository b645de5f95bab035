//! Salary period model.
//!
//! A [`Period`] is an inclusive calendar-date range that a salary record
//! applies to, or that a record query searches within.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// An inclusive range of calendar dates.
///
/// # Example
///
/// ```
/// use payroll_service::models::Period;
/// use chrono::NaiveDate;
///
/// let year = Period::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
/// );
/// let february = Period::new(
///     NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
/// );
/// assert!(year.contains(&february));
/// assert!(!february.contains(&year));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The first day of the period (inclusive).
    pub start: NaiveDate,
    /// The last day of the period (inclusive).
    pub end: NaiveDate,
}

impl Period {
    /// Creates a period without checking the ordering of its dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns true when `other` lies entirely inside this period.
    ///
    /// This is a containment test, not an overlap test: a window that
    /// starts before or ends after this one is not contained.
    pub fn contains(&self, other: &Period) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Checks that the end date is strictly after the start date.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.end <= self.start {
            return Err(ServiceError::InvalidPeriod {
                period_start: self.start,
                period_end: self.end,
            });
        }
        Ok(())
    }
}
