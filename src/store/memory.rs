//! In-memory store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Employee, NewEmployee, NewSalaryRecord, SalaryRecord};

use super::{EmployeePredicate, RecordPredicate, Store};

#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<i64, Employee>,
    records: BTreeMap<i64, SalaryRecord>,
    last_employee_id: i64,
    last_record_id: i64,
}

/// A [`Store`] backed by ordered maps behind a single lock.
///
/// Ids start at 1 and are never reused, even after a delete. Both tables
/// share one lock so a record query sees a consistent employee table.
///
/// # Example
///
/// ```
/// use payroll_service::models::NewEmployee;
/// use payroll_service::store::{MemoryStore, Store};
///
/// let store = MemoryStore::new();
/// let employee = store
///     .insert_employee(NewEmployee {
///         name: "Ada".to_string(),
///         position: "Engineer".to_string(),
///         department: "R&D".to_string(),
///     })
///     .unwrap();
/// assert_eq!(employee.id, 1);
/// assert!(store.get_employee(1).unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ServiceResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| ServiceError::Storage {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> ServiceResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| ServiceError::Storage {
            message: "store lock poisoned".to_string(),
        })
    }
}

impl Store for MemoryStore {
    fn insert_employee(&self, new: NewEmployee) -> ServiceResult<Employee> {
        let mut tables = self.write()?;
        tables.last_employee_id += 1;
        let employee = Employee::from_new(tables.last_employee_id, new);
        tables.employees.insert(employee.id, employee.clone());
        debug!(employee_id = employee.id, "Inserted employee");
        Ok(employee)
    }

    fn get_employee(&self, id: i64) -> ServiceResult<Option<Employee>> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    fn update_employee(&self, employee: &Employee) -> ServiceResult<bool> {
        let mut tables = self.write()?;
        match tables.employees.get_mut(&employee.id) {
            Some(stored) => {
                *stored = employee.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_employee(&self, id: i64) -> ServiceResult<bool> {
        Ok(self.write()?.employees.remove(&id).is_some())
    }

    fn query_employees(&self, predicate: EmployeePredicate<'_>) -> ServiceResult<Vec<Employee>> {
        let tables = self.read()?;
        Ok(tables
            .employees
            .values()
            .filter(|&employee| predicate(employee))
            .cloned()
            .collect())
    }

    fn insert_record(&self, new: NewSalaryRecord) -> ServiceResult<SalaryRecord> {
        let mut tables = self.write()?;
        tables.last_record_id += 1;
        let record = SalaryRecord::from_new(tables.last_record_id, new);
        tables.records.insert(record.id, record.clone());
        debug!(
            record_id = record.id,
            employee_id = record.employee_id,
            "Inserted salary record"
        );
        Ok(record)
    }

    fn get_record(&self, id: i64) -> ServiceResult<Option<SalaryRecord>> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    fn delete_record(&self, id: i64) -> ServiceResult<bool> {
        Ok(self.write()?.records.remove(&id).is_some())
    }

    fn query_records(&self, predicate: RecordPredicate<'_>) -> ServiceResult<Vec<SalaryRecord>> {
        let tables = self.read()?;
        Ok(tables
            .records
            .values()
            .filter(|&record| predicate(record, tables.employees.get(&record.employee_id)))
            .cloned()
            .collect())
    }
}
