//! HTTP API module for the payroll service.
//!
//! This module provides the REST endpoints for salary calculation,
//! salary records and employees.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EmployeeListQuery, RecordPeriodQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
