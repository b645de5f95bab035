//! Persistence for employees and salary records.
//!
//! The services depend only on the [`Store`] trait: insert, point lookup,
//! update, delete and predicate query for each entity kind. [`SqliteStore`]
//! keeps data in a SQLite database and is what the binary uses by default;
//! [`MemoryStore`] keeps everything in process. [`connect`] picks one from
//! the configured database URL.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use crate::error::ServiceResult;
use crate::models::{Employee, NewEmployee, NewSalaryRecord, SalaryRecord};

/// Database URL that selects the in-process [`MemoryStore`].
pub const MEMORY_STORE_URL: &str = "memory://";

/// Opens the store named by `database_url`.
///
/// [`MEMORY_STORE_URL`] gives a [`MemoryStore`]; any other value is opened
/// with [`SqliteStore::open`].
pub fn connect(database_url: &str) -> ServiceResult<Arc<dyn Store>> {
    if database_url == MEMORY_STORE_URL {
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(SqliteStore::open(database_url)?))
}

/// Predicate over employees.
pub type EmployeePredicate<'a> = &'a dyn Fn(&Employee) -> bool;

/// Predicate over salary records joined to their employee.
///
/// The employee is `None` when the record references an employee that
/// does not exist (or no longer exists).
pub type RecordPredicate<'a> = &'a dyn Fn(&SalaryRecord, Option<&Employee>) -> bool;

/// Typed storage interface for the two entity kinds.
///
/// Each method is a single, self-contained operation; implementations
/// acquire whatever session or lock they need for the duration of the call
/// and release it before returning.
pub trait Store: Send + Sync {
    /// Stores a new employee and returns it with its assigned id.
    fn insert_employee(&self, new: NewEmployee) -> ServiceResult<Employee>;

    /// Looks up an employee by id.
    fn get_employee(&self, id: i64) -> ServiceResult<Option<Employee>>;

    /// Replaces a stored employee. Returns false when no employee has that id.
    fn update_employee(&self, employee: &Employee) -> ServiceResult<bool>;

    /// Removes an employee. Returns false when no employee has that id.
    fn delete_employee(&self, id: i64) -> ServiceResult<bool>;

    /// Returns every employee matching `predicate`, ordered by id.
    fn query_employees(&self, predicate: EmployeePredicate<'_>) -> ServiceResult<Vec<Employee>>;

    /// Stores a new salary record and returns it with its assigned id.
    fn insert_record(&self, new: NewSalaryRecord) -> ServiceResult<SalaryRecord>;

    /// Looks up a salary record by id.
    fn get_record(&self, id: i64) -> ServiceResult<Option<SalaryRecord>>;

    /// Removes a salary record. Returns false when no record has that id.
    fn delete_record(&self, id: i64) -> ServiceResult<bool>;

    /// Returns every salary record matching `predicate`, ordered by id.
    fn query_records(&self, predicate: RecordPredicate<'_>) -> ServiceResult<Vec<SalaryRecord>>;
}
