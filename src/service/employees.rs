//! Employee service.

use std::sync::Arc;

use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Employee, EmployeeUpdate, EmployeeWithRecords, NewEmployee, SalaryRecord};
use crate::store::Store;

use super::salary_records::EMPLOYEE_RESOURCE;

/// Creates, reads, updates and deletes employees.
///
/// Deleting an employee leaves its salary records in place.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn Store>,
}

impl EmployeeService {
    /// Creates a service over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Validates and stores a new employee.
    pub fn create(&self, new: NewEmployee) -> ServiceResult<Employee> {
        new.validate()?;
        let employee = self.store.insert_employee(new)?;
        info!(employee_id = employee.id, "Created employee");
        Ok(employee)
    }

    /// Lists employees in id order, optionally restricted to a department.
    pub fn list(&self, department: Option<&str>) -> ServiceResult<Vec<Employee>> {
        match department.filter(|d| !d.is_empty()) {
            Some(department) => self
                .store
                .query_employees(&|e: &Employee| e.department == department),
            None => self.store.query_employees(&|_: &Employee| true),
        }
    }

    /// Returns an employee together with its salary records.
    pub fn get(&self, id: i64) -> ServiceResult<EmployeeWithRecords> {
        let employee = self
            .store
            .get_employee(id)?
            .ok_or_else(|| ServiceError::not_found(EMPLOYEE_RESOURCE, id))?;
        let salaries = self
            .store
            .query_records(&|record: &SalaryRecord, _: Option<&Employee>| record.employee_id == id)?;

        Ok(EmployeeWithRecords { employee, salaries })
    }

    /// Applies a partial update and returns the updated employee.
    pub fn update(&self, id: i64, update: EmployeeUpdate) -> ServiceResult<Employee> {
        update.validate()?;

        let mut employee = self
            .store
            .get_employee(id)?
            .ok_or_else(|| ServiceError::not_found(EMPLOYEE_RESOURCE, id))?;
        employee.apply(update);

        if !self.store.update_employee(&employee)? {
            return Err(ServiceError::not_found(EMPLOYEE_RESOURCE, id));
        }
        info!(employee_id = id, "Updated employee");
        Ok(employee)
    }

    /// Deletes an employee. Its salary records are kept.
    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.store.delete_employee(id)? {
            return Err(ServiceError::not_found(EMPLOYEE_RESOURCE, id));
        }
        info!(employee_id = id, "Deleted employee");
        Ok(())
    }
}
