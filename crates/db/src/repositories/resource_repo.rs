//! Repository for the per-asset resource list.

use demiurge_core::error::GraphError;
use demiurge_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::resource::{CreateResource, Resource};
use crate::repositories::AssetRepo;

/// Column list for `nft_resources` queries.
const RESOURCE_COLUMNS: &str = "\
    id, nft_uuid, resource_type, uri, priority, context_tags, created_at";

/// Provides add/remove/list operations for resource records.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Append a resource record. Duplicate `(resource_type, uri)` pairs
    /// are permitted; the same URI can be registered at different
    /// priorities for different context tags.
    pub async fn add(
        pool: &PgPool,
        nft_uuid: &str,
        input: &CreateResource,
    ) -> Result<Resource, StoreError> {
        if !AssetRepo::exists(pool, nft_uuid).await? {
            return Err(GraphError::AssetNotFound(nft_uuid.to_string()).into());
        }

        let query = format!(
            "INSERT INTO nft_resources (nft_uuid, resource_type, uri, priority, context_tags) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {RESOURCE_COLUMNS}"
        );
        let resource = sqlx::query_as::<_, Resource>(&query)
            .bind(nft_uuid)
            .bind(&input.resource_type)
            .bind(&input.uri)
            .bind(input.priority)
            .bind(input.context_tags.clone().unwrap_or_default())
            .fetch_one(pool)
            .await?;
        Ok(resource)
    }

    /// Remove a resource by id. Fails with `ResourceNotFound` when the id
    /// does not exist or belongs to a different asset.
    pub async fn remove(
        pool: &PgPool,
        nft_uuid: &str,
        resource_id: DbId,
    ) -> Result<Resource, StoreError> {
        let query = format!(
            "DELETE FROM nft_resources \
             WHERE id = $1 AND nft_uuid = $2 \
             RETURNING {RESOURCE_COLUMNS}"
        );
        let resource = sqlx::query_as::<_, Resource>(&query)
            .bind(resource_id)
            .bind(nft_uuid)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| GraphError::ResourceNotFound {
                nft_uuid: nft_uuid.to_string(),
                resource_id,
            })?;
        Ok(resource)
    }

    /// All resources registered for the given asset, as an unordered set;
    /// callers apply the priority rule themselves.
    pub async fn list_for_asset(
        pool: &PgPool,
        nft_uuid: &str,
    ) -> Result<Vec<Resource>, StoreError> {
        let query = format!(
            "SELECT {RESOURCE_COLUMNS} FROM nft_resources \
             WHERE nft_uuid = $1 ORDER BY id"
        );
        let resources = sqlx::query_as::<_, Resource>(&query)
            .bind(nft_uuid)
            .fetch_all(pool)
            .await?;
        Ok(resources)
    }
}
