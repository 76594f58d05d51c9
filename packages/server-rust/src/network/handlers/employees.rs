//! `/employees` resource handlers.
//!
//! Thin adapters: each handler makes exactly one [`RecordStore`] call and
//! maps its outcome to a response. `StoreError::NotFound` becomes 404 and
//! `StoreError::Conflict` becomes 409 via [`ApiError`].
//!
//! [`RecordStore`]: crate::storage::RecordStore

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roster_core::{is_numeric_id, Employee, EmployeePatch};
use tracing::debug;

use super::error::{ApiError, ApiJson};
use super::AppState;
use crate::storage::StoreError;

/// `GET /employees` -- every record, oldest first.
pub async fn list_employees(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.store.list())
}

/// `GET /employees/{id}`
///
/// Non-numeric ids are still looked up; they are only noted at debug level.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    if !is_numeric_id(&id) {
        debug!(%id, "lookup with non-numeric employee id");
    }
    Ok(Json(state.store.get(&id)?))
}

/// `POST /employees` -- 200 with the stored record, 409 on a duplicate id.
pub async fn create_employee(
    State(state): State<AppState>,
    ApiJson(employee): ApiJson<Employee>,
) -> Result<Json<Employee>, ApiError> {
    if employee.id.is_empty() {
        return Err(ApiError::invalid_request("employee id must not be empty"));
    }
    Ok(Json(state.store.create(employee)?))
}

/// `PUT /employees/{id}` -- replaces name and department; never creates.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EmployeePatch>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(state.store.update(&id, &patch)?))
}

/// `DELETE /employees/{id}` -- 204 when removed, 404 otherwise.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StoreError::NotFound { id }.into())
    }
}
