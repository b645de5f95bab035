//! Request types for the payroll service API.
//!
//! JSON bodies deserialize straight into the domain types
//! ([`PayParameters`](crate::models::PayParameters),
//! [`SalaryRecordDraft`](crate::models::SalaryRecordDraft),
//! [`NewEmployee`](crate::models::NewEmployee),
//! [`EmployeeUpdate`](crate::models::EmployeeUpdate)); this module holds the
//! query-string types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Period;

/// Query string for `GET /salary/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPeriodQuery {
    /// Earliest allowed record start date (inclusive).
    pub period_start: NaiveDate,
    /// Latest allowed record end date (inclusive).
    pub period_end: NaiveDate,
    /// Restrict results to employees of this department.
    #[serde(default)]
    pub department: Option<String>,
}

impl RecordPeriodQuery {
    /// The query window.
    pub fn period(&self) -> Period {
        Period::new(self.period_start, self.period_end)
    }
}

/// Query string for `GET /employees`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeListQuery {
    /// Restrict results to this department.
    #[serde(default)]
    pub department: Option<String>,
}
