//! Salary record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PayParameters, Period};

/// A persisted salary calculation for one employee and one period.
///
/// `calculated_salary` is fixed when the record is created and is never
/// recomputed; records are not updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// The employee this record belongs to.
    pub employee_id: i64,
    /// Regular hours worked.
    pub base_hours: f64,
    /// Pay per regular hour.
    pub hourly_rate: f64,
    /// Overtime hours worked.
    pub overtime_hours: f64,
    /// Amount deducted from gross pay.
    pub deductions: f64,
    /// The first day of the salary period.
    pub period_start: NaiveDate,
    /// The last day of the salary period.
    pub period_end: NaiveDate,
    /// Net salary computed at creation time.
    pub calculated_salary: f64,
}

impl SalaryRecord {
    /// Builds a stored record from its insert payload and an assigned id.
    pub fn from_new(id: i64, new: NewSalaryRecord) -> Self {
        Self {
            id,
            employee_id: new.employee_id,
            base_hours: new.base_hours,
            hourly_rate: new.hourly_rate,
            overtime_hours: new.overtime_hours,
            deductions: new.deductions,
            period_start: new.period_start,
            period_end: new.period_end,
            calculated_salary: new.calculated_salary,
        }
    }

    /// The period this record applies to.
    pub fn period(&self) -> Period {
        Period::new(self.period_start, self.period_end)
    }
}

/// A fully computed salary record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSalaryRecord {
    /// The employee this record belongs to.
    pub employee_id: i64,
    /// Regular hours worked.
    pub base_hours: f64,
    /// Pay per regular hour.
    pub hourly_rate: f64,
    /// Overtime hours worked.
    pub overtime_hours: f64,
    /// Amount deducted from gross pay.
    pub deductions: f64,
    /// The first day of the salary period.
    pub period_start: NaiveDate,
    /// The last day of the salary period.
    pub period_end: NaiveDate,
    /// Net salary produced by the pay calculator.
    pub calculated_salary: f64,
}

/// Input for creating a salary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecordDraft {
    /// The employee the record belongs to.
    pub employee_id: i64,
    /// Hours, rate, overtime and deductions to compute pay from.
    #[serde(flatten)]
    pub parameters: PayParameters,
    /// The first day of the salary period.
    pub period_start: NaiveDate,
    /// The last day of the salary period.
    pub period_end: NaiveDate,
}

impl SalaryRecordDraft {
    /// The period this draft applies to.
    pub fn period(&self) -> Period {
        Period::new(self.period_start, self.period_end)
    }

    /// Attaches a computed net salary, producing an insertable record.
    pub fn into_new_record(self, calculated_salary: f64) -> NewSalaryRecord {
        NewSalaryRecord {
            employee_id: self.employee_id,
            base_hours: self.parameters.base_hours,
            hourly_rate: self.parameters.hourly_rate,
            overtime_hours: self.parameters.overtime_hours,
            deductions: self.parameters.deductions,
            period_start: self.period_start,
            period_end: self.period_end,
            calculated_salary,
        }
    }
}
