//! Route definitions for the asset containment graph.
//!
//! All routes are mounted under `/assets`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{assets, containment, resources};
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /                   -> list_assets
/// POST   /                   -> create_asset
/// GET    /{uuid}             -> get_asset
/// PATCH  /{uuid}             -> update_asset
/// POST   /{uuid}/nest        -> nest_child
/// DELETE /{uuid}/nest        -> unnest_child
/// POST   /{uuid}/equip       -> equip_child
/// DELETE /{uuid}/equip       -> unequip_slot
/// POST   /{uuid}/delegate    -> delegate_asset
/// DELETE /{uuid}/delegate    -> revoke_delegation
/// POST   /{uuid}/resources   -> add_resource
/// DELETE /{uuid}/resources   -> remove_resource
/// PUT    /{uuid}/state       -> upsert_state
/// DELETE /{uuid}/state       -> remove_state
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/{uuid}",
            get(assets::get_asset).patch(assets::update_asset),
        )
        .route(
            "/{uuid}/nest",
            post(containment::nest_child).delete(containment::unnest_child),
        )
        .route(
            "/{uuid}/equip",
            post(containment::equip_child).delete(containment::unequip_slot),
        )
        .route(
            "/{uuid}/delegate",
            post(containment::delegate_asset).delete(containment::revoke_delegation),
        )
        .route(
            "/{uuid}/resources",
            post(resources::add_resource).delete(resources::remove_resource),
        )
        .route(
            "/{uuid}/state",
            put(resources::upsert_state).delete(resources::remove_state),
        )
}
