//! Repository for asset rows: creation, lookup, search, field updates.

use demiurge_core::error::CoreError;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::asset::{
    Asset, AssetSearchParams, AssetWithChildrenCount, CreateAsset, UpdateAsset,
};

/// Column list for `nft_assets` queries.
pub(crate) const ASSET_COLUMNS: &str = "\
    uuid, name, description, creator_account, owner_account, \
    owner_before_nesting, class_id, level, experience_points, \
    durability, kill_count, parent_uuid, delegated_user, \
    delegation_expires_at_block, delegated_at_block, \
    created_at, updated_at";

/// Default page size for asset listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for asset listing.
const MAX_LIMIT: i64 = 100;

/// Default class identifier when the creation payload omits one.
const DEFAULT_CLASS_ID: i32 = 1;

/// Provides CRUD operations for asset rows.
pub struct AssetRepo;

impl AssetRepo {
    /// Create a new asset together with its initial resources, equipment
    /// slots, and custom state, all in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, StoreError> {
        let mut tx = pool.begin().await?;

        let existing: Option<(String,)> =
            sqlx::query_as("SELECT uuid FROM nft_assets WHERE uuid = $1")
                .bind(&input.uuid)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() {
            return Err(CoreError::Conflict(format!(
                "Asset with uuid {} already exists",
                input.uuid
            ))
            .into());
        }

        let query = format!(
            "INSERT INTO nft_assets (\
                uuid, name, description, creator_account, owner_account, class_id\
             ) VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ASSET_COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(&input.uuid)
            .bind(&input.name)
            .bind(input.description.as_deref())
            .bind(&input.creator_account)
            .bind(&input.owner_account)
            .bind(input.class_id.unwrap_or(DEFAULT_CLASS_ID))
            .fetch_one(&mut *tx)
            .await?;

        for resource in &input.resources {
            sqlx::query(
                "INSERT INTO nft_resources (nft_uuid, resource_type, uri, priority, context_tags) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&input.uuid)
            .bind(&resource.resource_type)
            .bind(&resource.uri)
            .bind(resource.priority)
            .bind(resource.context_tags.clone().unwrap_or_default())
            .execute(&mut *tx)
            .await?;
        }

        for slot in &input.equipment_slots {
            sqlx::query(
                "INSERT INTO equipment_slots (nft_uuid, slot_name, required_trait) \
                 VALUES ($1, $2, $3)",
            )
            .bind(&input.uuid)
            .bind(&slot.slot_name)
            .bind(slot.required_trait.as_deref())
            .execute(&mut *tx)
            .await?;
        }

        for (key, value) in &input.custom_state {
            sqlx::query(
                "INSERT INTO custom_state (nft_uuid, state_key, state_value) \
                 VALUES ($1, $2, $3)",
            )
            .bind(&input.uuid)
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(asset)
    }

    /// Find an asset by uuid.
    pub async fn find_by_uuid(pool: &PgPool, uuid: &str) -> Result<Option<Asset>, StoreError> {
        let query = format!("SELECT {ASSET_COLUMNS} FROM nft_assets WHERE uuid = $1");
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await?;
        Ok(asset)
    }

    /// Check whether an asset exists.
    pub async fn exists(pool: &PgPool, uuid: &str) -> Result<bool, StoreError> {
        let found: Option<(String,)> = sqlx::query_as("SELECT uuid FROM nft_assets WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }

    /// Assets directly nested under the given parent.
    pub async fn children(pool: &PgPool, parent_uuid: &str) -> Result<Vec<Asset>, StoreError> {
        let query = format!(
            "SELECT {ASSET_COLUMNS} FROM nft_assets \
             WHERE parent_uuid = $1 ORDER BY created_at"
        );
        let children = sqlx::query_as::<_, Asset>(&query)
            .bind(parent_uuid)
            .fetch_all(pool)
            .await?;
        Ok(children)
    }

    /// Search assets with optional filters and pagination.
    /// Results carry a direct-child count and are ordered newest first.
    pub async fn search(
        pool: &PgPool,
        params: &AssetSearchParams,
    ) -> Result<Vec<AssetWithChildrenCount>, StoreError> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.owner.is_some() {
            conditions.push(format!("a.owner_account = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.search.is_some() {
            conditions.push(format!(
                "(a.name ILIKE ${bind_idx} OR a.description ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        match params.has_parent {
            Some(true) => conditions.push("a.parent_uuid IS NOT NULL".to_string()),
            Some(false) => conditions.push("a.parent_uuid IS NULL".to_string()),
            None => {}
        }
        if params.is_delegated == Some(true) {
            conditions.push("a.delegated_user IS NOT NULL".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT \
                a.uuid, a.name, a.description, a.creator_account, a.owner_account, \
                a.owner_before_nesting, a.class_id, a.level, a.experience_points, \
                a.durability, a.kill_count, a.parent_uuid, a.delegated_user, \
                a.delegation_expires_at_block, a.delegated_at_block, \
                a.created_at, a.updated_at, \
                (SELECT COUNT(*) FROM nft_assets c WHERE c.parent_uuid = a.uuid) AS children_count \
             FROM nft_assets a \
             {where_clause} \
             ORDER BY a.created_at DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            where_clause = where_clause,
            bind_idx = bind_idx,
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, AssetWithChildrenCount>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref owner) = params.owner {
            q = q.bind(owner);
        }
        if let Some(ref search) = params.search {
            q = q.bind(format!("%{search}%"));
        }

        q = q.bind(limit).bind(offset);
        let assets = q.fetch_all(pool).await?;
        Ok(assets)
    }

    /// Apply a field-level update. Returns the updated row, or `None` if
    /// the asset does not exist.
    pub async fn update(
        pool: &PgPool,
        uuid: &str,
        input: &UpdateAsset,
    ) -> Result<Option<Asset>, StoreError> {
        let query = format!(
            "UPDATE nft_assets SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                owner_account = COALESCE($4, owner_account), \
                experience_points = COALESCE($5, experience_points), \
                level = COALESCE($6, level), \
                durability = COALESCE($7, durability), \
                kill_count = COALESCE($8, kill_count), \
                class_id = COALESCE($9, class_id), \
                updated_at = now() \
             WHERE uuid = $1 \
             RETURNING {ASSET_COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(uuid)
            .bind(input.name.as_deref())
            .bind(input.description.as_deref())
            .bind(input.owner_account.as_deref())
            .bind(input.experience_points)
            .bind(input.level)
            .bind(input.durability)
            .bind(input.kill_count)
            .bind(input.class_id)
            .fetch_optional(pool)
            .await?;
        Ok(asset)
    }
}
