//! Handlers for asset CRUD: creation, detail, listing, field updates.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use demiurge_core::error::GraphError;
use demiurge_core::resources::{select_resource, ResourceView};
use demiurge_core::validation;
use demiurge_db::models::asset::{AssetSearchParams, CreateAsset, UpdateAsset};
use demiurge_db::repositories::{AssetRepo, ContainmentRepo, ResourceRepo, StateRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for asset detail.
#[derive(Debug, Deserialize)]
pub struct DetailParams {
    /// Optional context tag used to pick the primary resource.
    pub context: Option<String>,
}

/// GET /api/v1/assets
///
/// List/search assets with optional filters.
pub async fn list_assets(
    State(state): State<AppState>,
    Query(params): Query<AssetSearchParams>,
) -> AppResult<impl IntoResponse> {
    let assets = AssetRepo::search(&state.pool, &params).await?;

    Ok(Json(DataResponse { data: assets }))
}

/// POST /api/v1/assets
///
/// Create a new asset with optional initial resources, equipment slots,
/// and custom state, applied atomically.
pub async fn create_asset(
    State(state): State<AppState>,
    Json(input): Json<CreateAsset>,
) -> AppResult<impl IntoResponse> {
    validation::validate_asset_uuid(&input.uuid)?;
    validation::validate_asset_name(&input.name)?;
    validation::validate_account(&input.creator_account)?;
    validation::validate_account(&input.owner_account)?;

    let slot_names: Vec<&str> = input
        .equipment_slots
        .iter()
        .map(|s| s.slot_name.as_str())
        .collect();
    validation::validate_slot_names(&slot_names)?;

    for resource in &input.resources {
        validation::validate_resource_fields(&resource.resource_type, &resource.uri)?;
    }
    for key in input.custom_state.keys() {
        validation::validate_state_key(key)?;
    }

    let asset = AssetRepo::create(&state.pool, &input).await?;

    tracing::info!(
        uuid = %asset.uuid,
        name = %asset.name,
        owner = %asset.owner_account,
        "Asset created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// GET /api/v1/assets/{uuid}
///
/// Full asset detail: the row plus resources, equipment slots, custom
/// state, and direct children. With a `context` query parameter the
/// response also names the primary resource for that context.
pub async fn get_asset(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(params): Query<DetailParams>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::find_by_uuid(&state.pool, &uuid)
        .await?
        .ok_or_else(|| AppError::Graph(GraphError::AssetNotFound(uuid.clone())))?;

    let resources = ResourceRepo::list_for_asset(&state.pool, &uuid).await?;
    let slots = ContainmentRepo::slots_for_asset(&state.pool, &uuid).await?;
    let custom_state = StateRepo::list_for_asset(&state.pool, &uuid).await?;
    let children = AssetRepo::children(&state.pool, &uuid).await?;

    let views: Vec<ResourceView<'_>> = resources
        .iter()
        .map(|r| ResourceView {
            id: r.id,
            priority: r.priority,
            context_tags: &r.context_tags,
        })
        .collect();
    let primary_id = select_resource(&views, params.context.as_deref());
    let primary_resource = primary_id.and_then(|id| resources.iter().find(|r| r.id == id));

    let detail = serde_json::json!({
        "asset": asset,
        "resources": resources,
        "equipment_slots": slots,
        "custom_state": custom_state,
        "children": children,
        "primary_resource": primary_resource,
    });

    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/v1/assets/{uuid}
///
/// Field-level update over the allowed field set. An empty patch is
/// rejected.
pub async fn update_asset(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(input): Json<UpdateAsset>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(demiurge_core::error::CoreError::Validation(
            "No valid fields to update".to_string(),
        )
        .into());
    }
    if let Some(ref name) = input.name {
        validation::validate_asset_name(name)?;
    }
    if let Some(ref owner) = input.owner_account {
        validation::validate_account(owner)?;
    }

    let asset = AssetRepo::update(&state.pool, &uuid, &input)
        .await?
        .ok_or_else(|| AppError::Graph(GraphError::AssetNotFound(uuid.clone())))?;

    tracing::info!(uuid = %uuid, "Asset updated");

    Ok(Json(DataResponse { data: asset }))
}
