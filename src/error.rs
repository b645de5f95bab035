//! Error types for the payroll service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the calculator, the store and the services can report.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll service.
///
/// All operations in the crate return this error type; the HTTP layer maps
/// each variant onto a status code and a JSON error body.
///
/// # Example
///
/// ```
/// use payroll_service::error::ServiceError;
///
/// let error = ServiceError::NotFound {
///     resource: "salary record".to_string(),
///     id: 42,
/// };
/// assert_eq!(error.to_string(), "salary record 42 not found");
/// ```
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input field was missing, negative or otherwise unusable.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A period whose end date is not after its start date.
    #[error("Invalid period: end date {period_end} must be after start date {period_start}")]
    InvalidPeriod {
        /// The first day of the period.
        period_start: NaiveDate,
        /// The last day of the period.
        period_end: NaiveDate,
    },

    /// A referenced entity does not exist in the store.
    #[error("{resource} {id} not found")]
    NotFound {
        /// The kind of entity that was looked up.
        resource: String,
        /// The identifier that was looked up.
        id: i64,
    },

    /// No salary records exist for the employee.
    #[error("No salary records found for employee {employee_id}")]
    EmployeeRecordsNotFound {
        /// The employee whose records were requested.
        employee_id: i64,
    },

    /// The persistence store failed to complete an operation.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl ServiceError {
    /// Shorthand for a [`ServiceError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`ServiceError::NotFound`] error.
    pub fn not_found(resource: impl Into<String>, id: i64) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }
}

/// A type alias for Results that return ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;
