//! Repository for per-asset custom state entries.

use demiurge_core::error::GraphError;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::custom_state::CustomStateEntry;
use crate::repositories::AssetRepo;

/// Column list for `custom_state` queries.
const STATE_COLUMNS: &str = "\
    id, nft_uuid, state_key, state_value, created_at, updated_at";

/// Provides upsert/remove/list operations for custom state.
pub struct StateRepo;

impl StateRepo {
    /// Insert or overwrite the entry for `state_key`. Keys are unique per
    /// asset, so an upsert either creates the pair or replaces its value.
    pub async fn upsert(
        pool: &PgPool,
        nft_uuid: &str,
        state_key: &str,
        state_value: &str,
    ) -> Result<CustomStateEntry, StoreError> {
        if !AssetRepo::exists(pool, nft_uuid).await? {
            return Err(GraphError::AssetNotFound(nft_uuid.to_string()).into());
        }

        let query = format!(
            "INSERT INTO custom_state (nft_uuid, state_key, state_value) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (nft_uuid, state_key) \
             DO UPDATE SET state_value = EXCLUDED.state_value, updated_at = now() \
             RETURNING {STATE_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, CustomStateEntry>(&query)
            .bind(nft_uuid)
            .bind(state_key)
            .bind(state_value)
            .fetch_one(pool)
            .await?;
        Ok(entry)
    }

    /// Remove the entry for `state_key`. Fails with `StateKeyNotFound`
    /// when the asset has no such key.
    pub async fn remove(
        pool: &PgPool,
        nft_uuid: &str,
        state_key: &str,
    ) -> Result<CustomStateEntry, StoreError> {
        let query = format!(
            "DELETE FROM custom_state \
             WHERE nft_uuid = $1 AND state_key = $2 \
             RETURNING {STATE_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, CustomStateEntry>(&query)
            .bind(nft_uuid)
            .bind(state_key)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| GraphError::StateKeyNotFound {
                nft_uuid: nft_uuid.to_string(),
                state_key: state_key.to_string(),
            })?;
        Ok(entry)
    }

    /// All custom-state entries for the given asset.
    pub async fn list_for_asset(
        pool: &PgPool,
        nft_uuid: &str,
    ) -> Result<Vec<CustomStateEntry>, StoreError> {
        let query = format!(
            "SELECT {STATE_COLUMNS} FROM custom_state \
             WHERE nft_uuid = $1 ORDER BY state_key"
        );
        let entries = sqlx::query_as::<_, CustomStateEntry>(&query)
            .bind(nft_uuid)
            .fetch_all(pool)
            .await?;
        Ok(entries)
    }
}
