//! Application state for the payroll service API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::service::{EmployeeService, SalaryRecordService};
use crate::store::Store;

/// Shared application state.
///
/// Holds the store handle and the loaded settings. Services are built from
/// it per request.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn Store>,
    settings: Arc<Settings>,
}

impl AppState {
    /// Creates a new application state over the given store and settings.
    pub fn new(store: Arc<dyn Store>, settings: Settings) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns a salary record service bound to the shared store.
    pub fn salary_records(&self) -> SalaryRecordService {
        SalaryRecordService::new(self.store.clone(), self.settings.records)
    }

    /// Returns an employee service bound to the shared store.
    pub fn employees(&self) -> EmployeeService {
        EmployeeService::new(self.store.clone())
    }
}
