//! HTTP request handlers for the payroll service API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{
    Employee, EmployeeUpdate, EmployeeWithRecords, NewEmployee, PayBreakdown, PayParameters,
    SalaryRecord, SalaryRecordDraft,
};

use super::request::{EmployeeListQuery, RecordPeriodQuery};
use super::response::ApiErrorResponse;
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/salary/calculate", post(calculate_handler))
        .route(
            "/salary/records",
            post(create_record_handler).get(records_by_period_handler),
        )
        .route(
            "/salary/records/by-employee/:employee_id",
            get(records_by_employee_handler),
        )
        .route(
            "/salary/records/:id",
            get(get_record_handler).delete(delete_record_handler),
        )
        .route(
            "/employees",
            post(create_employee_handler).get(list_employees_handler),
        )
        .route(
            "/employees/:id",
            get(get_employee_handler)
                .put(update_employee_handler)
                .delete(delete_employee_handler),
        )
        .with_state(state)
}

/// Logs a rejected or failed request and converts the cause into a response.
fn reject<E>(correlation_id: Uuid, cause: E) -> ApiErrorResponse
where
    E: std::fmt::Display + Into<ApiErrorResponse>,
{
    warn!(correlation_id = %correlation_id, error = %cause, "Request failed");
    cause.into()
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "app_name": state.settings().app_name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for POST /salary/calculate.
///
/// Computes a rounded pay breakdown without storing anything.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayParameters>, JsonRejection>,
) -> ApiResult<Json<PayBreakdown>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let Json(params) = payload.map_err(|e| reject(correlation_id, e))?;

    let start_time = Instant::now();
    let breakdown = state
        .salary_records()
        .compute_only(&params)
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        net_salary = breakdown.net_salary,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );
    Ok(Json(breakdown))
}

/// Handler for POST /salary/records.
async fn create_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryRecordDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SalaryRecord>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary record creation");

    let Json(draft) = payload.map_err(|e| reject(correlation_id, e))?;
    let record = state
        .salary_records()
        .create_record(draft)
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        record_id = record.id,
        employee_id = record.employee_id,
        net_salary = record.calculated_salary,
        "Salary record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /salary/records?period_start=&period_end=&department=.
async fn records_by_period_handler(
    State(state): State<AppState>,
    query: Result<Query<RecordPeriodQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SalaryRecord>>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing salary records by period");

    let Query(query) = query.map_err(|e| reject(correlation_id, e))?;
    let records = state
        .salary_records()
        .get_records_by_period(query.period(), query.department.as_deref())
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        count = records.len(),
        "Listed salary records by period"
    );
    Ok(Json(records))
}

/// Handler for GET /salary/records/{id}.
async fn get_record_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<SalaryRecord>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Fetching salary record");

    let Path(id) = id.map_err(|e| reject(correlation_id, e))?;
    let record = state
        .salary_records()
        .get_record_by_id(id)
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, record_id = id, "Fetched salary record");
    Ok(Json(record))
}

/// Handler for GET /salary/records/by-employee/{employee_id}.
async fn records_by_employee_handler(
    State(state): State<AppState>,
    employee_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<SalaryRecord>>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing salary records by employee");

    let Path(employee_id) = employee_id.map_err(|e| reject(correlation_id, e))?;
    let records = state
        .salary_records()
        .get_records_by_employee(employee_id)
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id,
        count = records.len(),
        "Listed salary records by employee"
    );
    Ok(Json(records))
}

/// Handler for DELETE /salary/records/{id}.
async fn delete_record_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Deleting salary record");

    let Path(id) = id.map_err(|e| reject(correlation_id, e))?;
    state
        .salary_records()
        .delete_record(id)
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, record_id = id, "Deleted salary record");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee creation");

    let Json(new) = payload.map_err(|e| reject(correlation_id, e))?;
    let employee = state
        .employees()
        .create(new)
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, employee_id = employee.id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for GET /employees?department=.
async fn list_employees_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeeListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Employee>>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing employees");

    let Query(query) = query.map_err(|e| reject(correlation_id, e))?;
    let employees = state
        .employees()
        .list(query.department.as_deref())
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, count = employees.len(), "Listed employees");
    Ok(Json(employees))
}

/// Handler for GET /employees/{id}.
async fn get_employee_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<EmployeeWithRecords>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Fetching employee");

    let Path(id) = id.map_err(|e| reject(correlation_id, e))?;
    let employee = state
        .employees()
        .get(id)
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = id,
        records = employee.salaries.len(),
        "Fetched employee"
    );
    Ok(Json(employee))
}

/// Handler for PUT /employees/{id}.
async fn update_employee_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Updating employee");

    let Path(id) = id.map_err(|e| reject(correlation_id, e))?;
    let Json(update) = payload.map_err(|e| reject(correlation_id, e))?;
    let employee = state
        .employees()
        .update(id, update)
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, employee_id = id, "Updated employee");
    Ok(Json(employee))
}

/// Handler for DELETE /employees/{id}.
async fn delete_employee_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Deleting employee");

    let Path(id) = id.map_err(|e| reject(correlation_id, e))?;
    state
        .employees()
        .delete(id)
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, employee_id = id, "Deleted employee");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::config::Settings;
    use crate::store::MemoryStore;
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn create_test_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), Settings::default())
    }

    async fn post_json(router: Router, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_calculate_valid_request_returns_200() {
        let router = create_router(create_test_state());

        let (status, body) = post_json(
            router,
            "/salary/calculate",
            r#"{"base_hours": 160, "hourly_rate": 100, "overtime_hours": 10}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let breakdown: PayBreakdown = serde_json::from_slice(&body).unwrap();
        assert_eq!(breakdown.base_salary, 16000.0);
        assert_eq!(breakdown.overtime_pay, 1500.0);
        assert_eq!(breakdown.net_salary, 19100.0);
    }

    #[tokio::test]
    async fn test_calculate_negative_hours_returns_422() {
        let router = create_router(create_test_state());

        let (status, body) = post_json(
            router,
            "/salary/calculate",
            r#"{"base_hours": -40, "hourly_rate": 100, "overtime_hours": 10}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.field.as_deref(), Some("base_hours"));
    }

    #[tokio::test]
    async fn test_calculate_missing_field_returns_422() {
        let router = create_router(create_test_state());

        let (status, body) = post_json(
            router,
            "/salary/calculate",
            r#"{"salary_type": "daily", "days_worked": 20, "daily_rate": 500}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert!(
            error.message.contains("missing field"),
            "Expected error message to mention missing field, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_calculate_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let (status, body) = post_json(router, "/salary/calculate", "{invalid json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_health_reports_app_name() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["app_name"], "Salary Management API");
    }

    #[tokio::test]
    async fn test_non_numeric_record_id_returns_422() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/salary/records/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_handlers_log_start_and_success_with_correlation_id() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let state = create_test_state();
        let (status, _) = post_json(
            create_router(state.clone()),
            "/employees",
            r#"{"name": "Ada", "position": "Engineer", "department": "R&D"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = post_json(
            create_router(state),
            "/salary/records",
            r#"{"employee_id": 1, "base_hours": 160, "hourly_rate": 25,
                "period_start": "2025-01-01", "period_end": "2025-01-31"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let output = logs.contents();
        for message in [
            "Processing employee creation",
            "Employee created",
            "Processing salary record creation",
            "Salary record created",
        ] {
            let line = output
                .lines()
                .find(|line| line.contains(message))
                .unwrap_or_else(|| panic!("no log line for {:?} in:\n{}", message, output));
            assert!(line.contains("correlation_id="), "missing correlation id: {}", line);
        }
    }
}
