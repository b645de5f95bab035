//! Core data models for the payroll service.
//!
//! This module contains the domain models shared by the calculator,
//! the store, the services and the HTTP layer.

mod employee;
mod pay;
mod period;
mod salary_record;

pub use employee::{Employee, EmployeeUpdate, EmployeeWithRecords, NewEmployee};
pub use pay::{PayBreakdown, PayParameters};
pub use period::Period;
pub use salary_record::{NewSalaryRecord, SalaryRecord, SalaryRecordDraft};
