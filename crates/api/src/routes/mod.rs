pub mod assets;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets                    list, create
/// /assets/{uuid}             detail, field-level update
/// /assets/{uuid}/nest        nest child (POST), un-nest child (DELETE)
/// /assets/{uuid}/equip       equip child (POST), empty slot (DELETE)
/// /assets/{uuid}/delegate    set delegation (POST), revoke (DELETE)
/// /assets/{uuid}/resources   add resource (POST), remove (DELETE)
/// /assets/{uuid}/state       upsert entry (PUT), remove (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/assets", assets::router())
}
