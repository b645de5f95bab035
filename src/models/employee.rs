//! Employee model and related types.
//!
//! This module defines the stored [`Employee`] along with the payloads used
//! to create and update one.

use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

use super::SalaryRecord;

/// An employee whose salary records are tracked by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// The employee's name.
    pub name: String,
    /// The employee's position or job title.
    pub position: String,
    /// The department the employee belongs to.
    pub department: String,
}

impl Employee {
    /// Builds a stored employee from a creation payload and an assigned id.
    pub fn from_new(id: i64, new: NewEmployee) -> Self {
        Self {
            id,
            name: new.name,
            position: new.position,
            department: new.department,
        }
    }

    /// Applies a partial update; fields absent from `update` are left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_service::models::{Employee, EmployeeUpdate};
    ///
    /// let mut employee = Employee {
    ///     id: 1,
    ///     name: "Ada".to_string(),
    ///     position: "Engineer".to_string(),
    ///     department: "R&D".to_string(),
    /// };
    /// employee.apply(EmployeeUpdate {
    ///     department: Some("Platform".to_string()),
    ///     ..Default::default()
    /// });
    /// assert_eq!(employee.department, "Platform");
    /// assert_eq!(employee.position, "Engineer");
    /// ```
    pub fn apply(&mut self, update: EmployeeUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(department) = update.department {
            self.department = department;
        }
    }
}

/// Payload for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// The employee's name; must not be blank.
    pub name: String,
    /// The employee's position or job title.
    pub position: String,
    /// The department the employee belongs to.
    pub department: String,
}

impl NewEmployee {
    /// Checks that the name is not blank.
    pub fn validate(&self) -> ServiceResult<()> {
        validate_name(&self.name)
    }
}

/// Partial update for an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// New name, if changing.
    #[serde(default)]
    pub name: Option<String>,
    /// New position, if changing.
    #[serde(default)]
    pub position: Option<String>,
    /// New department, if changing.
    #[serde(default)]
    pub department: Option<String>,
}

impl EmployeeUpdate {
    /// Checks that a supplied name is not blank.
    pub fn validate(&self) -> ServiceResult<()> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::validation("name", "must not be empty"));
    }
    Ok(())
}

/// An employee together with every salary record that references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeWithRecords {
    /// The employee.
    #[serde(flatten)]
    pub employee: Employee,
    /// The employee's salary records in insertion order.
    pub salaries: Vec<SalaryRecord>,
}
