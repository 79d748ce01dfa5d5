//! Route handlers. Each one builds a request context, calls the worklist and
//! renders the reply.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use hwl_types::{EmployeeListEntry, Hospital, PerformanceEntry};
use hwl_worklist::{Reply, Status};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body of a transfer request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[serde(default)]
    pub target_hospital_id: String,
}

fn render<R: Serialize>(reply: Reply<R>) -> Response {
    let status = match reply.status {
        Status::Ok => StatusCode::OK,
        Status::Created => StatusCode::CREATED,
        Status::NoContent => StatusCode::NO_CONTENT,
    };
    match reply.body {
        Some(body) => (status, Json(body)).into_response(),
        None => status.into_response(),
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(value)| value).map_err(ApiError::from)
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "hwl-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// Hospitals

pub async fn list_hospitals(State(state): State<AppState>) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(state.worklist.list_hospitals(&ctx).await?))
}

pub async fn create_hospital(
    State(state): State<AppState>,
    payload: Result<Json<Hospital>, JsonRejection>,
) -> ApiResult<Response> {
    let hospital = body(payload)?;
    let ctx = state.request_context();
    Ok(render(state.worklist.create_hospital(&ctx, hospital).await?))
}

pub async fn get_hospital(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(state.worklist.get_hospital(&ctx, &hospital_id).await?))
}

pub async fn delete_hospital(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(state.worklist.delete_hospital(&ctx, &hospital_id).await?))
}

pub async fn list_roles(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(state.worklist.list_roles(&ctx, &hospital_id).await?))
}

// Employee list

pub async fn list_entries(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(state.worklist.list_entries(&ctx, &hospital_id).await?))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
    payload: Result<Json<EmployeeListEntry>, JsonRejection>,
) -> ApiResult<Response> {
    let entry = body(payload)?;
    let ctx = state.request_context();
    Ok(render(state.worklist.create_entry(&ctx, &hospital_id, entry).await?))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path((hospital_id, entry_id)): Path<(String, String)>,
) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(
        state.worklist.get_entry(&ctx, &hospital_id, &entry_id).await?,
    ))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path((hospital_id, entry_id)): Path<(String, String)>,
    payload: Result<Json<EmployeeListEntry>, JsonRejection>,
) -> ApiResult<Response> {
    let patch = body(payload)?;
    let ctx = state.request_context();
    Ok(render(
        state
            .worklist
            .update_entry(&ctx, &hospital_id, &entry_id, patch)
            .await?,
    ))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path((hospital_id, entry_id)): Path<(String, String)>,
) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(
        state.worklist.delete_entry(&ctx, &hospital_id, &entry_id).await?,
    ))
}

pub async fn transfer_entry(
    State(state): State<AppState>,
    Path((hospital_id, entry_id)): Path<(String, String)>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let request = body(payload)?;
    let ctx = state.request_context();
    Ok(render(
        state
            .worklist
            .transfer_entry(&ctx, &hospital_id, &entry_id, &request.target_hospital_id)
            .await?,
    ))
}

// Performances

pub async fn list_performances(
    State(state): State<AppState>,
    Path((hospital_id, entry_id)): Path<(String, String)>,
) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(
        state
            .worklist
            .list_performances(&ctx, &hospital_id, &entry_id)
            .await?,
    ))
}

pub async fn create_performance(
    State(state): State<AppState>,
    Path((hospital_id, entry_id)): Path<(String, String)>,
    payload: Result<Json<PerformanceEntry>, JsonRejection>,
) -> ApiResult<Response> {
    let performance = body(payload)?;
    let ctx = state.request_context();
    Ok(render(
        state
            .worklist
            .create_performance(&ctx, &hospital_id, &entry_id, performance)
            .await?,
    ))
}

pub async fn get_performance(
    State(state): State<AppState>,
    Path((hospital_id, entry_id, performance_id)): Path<(String, String, String)>,
) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(
        state
            .worklist
            .get_performance(&ctx, &hospital_id, &entry_id, &performance_id)
            .await?,
    ))
}

pub async fn update_performance(
    State(state): State<AppState>,
    Path((hospital_id, entry_id, performance_id)): Path<(String, String, String)>,
    payload: Result<Json<PerformanceEntry>, JsonRejection>,
) -> ApiResult<Response> {
    let patch = body(payload)?;
    let ctx = state.request_context();
    Ok(render(
        state
            .worklist
            .update_performance(&ctx, &hospital_id, &entry_id, &performance_id, patch)
            .await?,
    ))
}

pub async fn delete_performance(
    State(state): State<AppState>,
    Path((hospital_id, entry_id, performance_id)): Path<(String, String, String)>,
) -> ApiResult<Response> {
    let ctx = state.request_context();
    Ok(render(
        state
            .worklist
            .delete_performance(&ctx, &hospital_id, &entry_id, &performance_id)
            .await?,
    ))
}
