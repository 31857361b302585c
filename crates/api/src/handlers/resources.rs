//! Handlers for the per-asset resource list and custom state entries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use demiurge_core::types::DbId;
use demiurge_core::validation;
use demiurge_db::models::custom_state::UpsertState;
use demiurge_db::models::resource::CreateResource;
use demiurge_db::repositories::{ResourceRepo, StateRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query for removing a resource from the path asset.
#[derive(Debug, Deserialize)]
pub struct RemoveResourceParams {
    pub resource_id: DbId,
}

/// Query for removing a custom-state entry from the path asset.
#[derive(Debug, Deserialize)]
pub struct RemoveStateParams {
    pub state_key: String,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// POST /api/v1/assets/{uuid}/resources
///
/// Register a resource pointer. Duplicate `(resource_type, uri)` pairs are
/// permitted by design.
pub async fn add_resource(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(input): Json<CreateResource>,
) -> AppResult<impl IntoResponse> {
    validation::validate_resource_fields(&input.resource_type, &input.uri)?;

    let resource = ResourceRepo::add(&state.pool, &uuid, &input).await?;

    tracing::info!(
        uuid = %uuid,
        resource_id = resource.id,
        resource_type = %resource.resource_type,
        "Resource added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: resource })))
}

/// DELETE /api/v1/assets/{uuid}/resources?resource_id=...
///
/// Remove a resource by id; the id must belong to `{uuid}`.
pub async fn remove_resource(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(params): Query<RemoveResourceParams>,
) -> AppResult<impl IntoResponse> {
    let resource = ResourceRepo::remove(&state.pool, &uuid, params.resource_id).await?;

    tracing::info!(uuid = %uuid, resource_id = resource.id, "Resource removed");

    Ok(Json(DataResponse { data: resource }))
}

// ---------------------------------------------------------------------------
// Custom state
// ---------------------------------------------------------------------------

/// PUT /api/v1/assets/{uuid}/state
///
/// Insert or overwrite a custom-state entry.
pub async fn upsert_state(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(input): Json<UpsertState>,
) -> AppResult<impl IntoResponse> {
    validation::validate_state_key(&input.state_key)?;

    let entry = StateRepo::upsert(&state.pool, &uuid, &input.state_key, &input.state_value).await?;

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/assets/{uuid}/state?state_key=...
///
/// Remove a custom-state entry.
pub async fn remove_state(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(params): Query<RemoveStateParams>,
) -> AppResult<impl IntoResponse> {
    let entry = StateRepo::remove(&state.pool, &uuid, &params.state_key).await?;

    Ok(Json(DataResponse { data: entry }))
}
