//! Handlers for containment graph operations: nesting, equipping, and
//! delegation.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use demiurge_core::{delegation, validation};
use demiurge_db::models::asset::DelegateAsset;
use demiurge_db::models::equipment_slot::EquipChild;
use demiurge_db::repositories::ContainmentRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for nesting a child under the path asset.
#[derive(Debug, Deserialize)]
pub struct NestRequest {
    pub child_uuid: String,
}

/// Query for un-nesting a child from the path asset.
#[derive(Debug, Deserialize)]
pub struct UnnestParams {
    pub child_uuid: String,
}

/// Query for emptying a slot on the path asset.
#[derive(Debug, Deserialize)]
pub struct UnequipParams {
    pub slot_name: String,
}

// ---------------------------------------------------------------------------
// Nesting
// ---------------------------------------------------------------------------

/// POST /api/v1/assets/{uuid}/nest
///
/// Nest a child asset under `{uuid}`. The child takes the parent's owner;
/// its prior owner is recorded for restoration on un-nest.
pub async fn nest_child(
    State(state): State<AppState>,
    Path(parent_uuid): Path<String>,
    Json(input): Json<NestRequest>,
) -> AppResult<impl IntoResponse> {
    let child = ContainmentRepo::nest(&state.pool, &parent_uuid, &input.child_uuid).await?;

    tracing::info!(
        parent = %parent_uuid,
        child = %child.uuid,
        "Asset nested",
    );

    Ok(Json(DataResponse { data: child }))
}

/// DELETE /api/v1/assets/{uuid}/nest?child_uuid=...
///
/// Un-nest a child from `{uuid}`. Rejected while any equipment slot still
/// references the child as occupant.
pub async fn unnest_child(
    State(state): State<AppState>,
    Path(parent_uuid): Path<String>,
    Query(params): Query<UnnestParams>,
) -> AppResult<impl IntoResponse> {
    let child = ContainmentRepo::unnest(&state.pool, &parent_uuid, &params.child_uuid).await?;

    tracing::info!(
        parent = %parent_uuid,
        child = %child.uuid,
        "Asset un-nested",
    );

    Ok(Json(DataResponse { data: child }))
}

// ---------------------------------------------------------------------------
// Equipping
// ---------------------------------------------------------------------------

/// POST /api/v1/assets/{uuid}/equip
///
/// Equip a nested child into a named slot on `{uuid}`, replacing any
/// previous occupant.
pub async fn equip_child(
    State(state): State<AppState>,
    Path(host_uuid): Path<String>,
    Json(input): Json<EquipChild>,
) -> AppResult<impl IntoResponse> {
    validation::validate_slot_name(&input.slot_name)?;

    let slot =
        ContainmentRepo::equip(&state.pool, &host_uuid, &input.slot_name, &input.child_uuid)
            .await?;

    tracing::info!(
        host = %host_uuid,
        slot = %slot.slot_name,
        child = %input.child_uuid,
        "Asset equipped",
    );

    Ok(Json(DataResponse { data: slot }))
}

/// DELETE /api/v1/assets/{uuid}/equip?slot_name=...
///
/// Empty a slot on `{uuid}`. Idempotent.
pub async fn unequip_slot(
    State(state): State<AppState>,
    Path(host_uuid): Path<String>,
    Query(params): Query<UnequipParams>,
) -> AppResult<impl IntoResponse> {
    let slot = ContainmentRepo::unequip(&state.pool, &host_uuid, &params.slot_name).await?;

    Ok(Json(DataResponse { data: slot }))
}

// ---------------------------------------------------------------------------
// Delegation
// ---------------------------------------------------------------------------

/// POST /api/v1/assets/{uuid}/delegate
///
/// Delegate the asset to another account, overwriting any prior
/// delegation. When both `expires_at_block` and `current_block` are
/// supplied the expiry must lie in the future.
pub async fn delegate_asset(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(input): Json<DelegateAsset>,
) -> AppResult<impl IntoResponse> {
    validation::validate_account(&input.delegated_user)?;
    delegation::validate_expiry(input.expires_at_block, input.current_block)?;

    let asset = ContainmentRepo::delegate(&state.pool, &uuid, &input).await?;

    tracing::info!(
        uuid = %uuid,
        delegate = %input.delegated_user,
        expires_at_block = ?input.expires_at_block,
        "Delegation set",
    );

    Ok(Json(DataResponse { data: asset }))
}

/// DELETE /api/v1/assets/{uuid}/delegate
///
/// Revoke any delegation. Idempotent.
pub async fn revoke_delegation(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<impl IntoResponse> {
    let asset = ContainmentRepo::revoke_delegation(&state.pool, &uuid).await?;

    tracing::info!(uuid = %uuid, "Delegation revoked");

    Ok(Json(DataResponse { data: asset }))
}
