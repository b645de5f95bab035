//! Business operations over the store.
//!
//! Services are cheap to construct: each holds a shared handle to the
//! [`Store`](crate::store::Store) and nothing else that changes.

mod employees;
mod salary_records;

pub use employees::EmployeeService;
pub use salary_records::{EMPLOYEE_RESOURCE, SALARY_RECORD_RESOURCE, SalaryRecordService};
