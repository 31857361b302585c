//! Repository for containment graph operations: nest, un-nest, equip,
//! unequip, delegate, revoke.
//!
//! Every multi-step operation runs in one transaction and locks the
//! involved asset rows with `SELECT ... FOR UPDATE` before checking
//! preconditions, so two concurrent operations on the same assets cannot
//! both pass a check before either commits. Rows are locked in uuid order
//! to keep lock acquisition deterministic across concurrent callers.

use demiurge_core::containment;
use demiurge_core::error::GraphError;
use sqlx::postgres::PgConnection;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::asset::{Asset, DelegateAsset};
use crate::models::equipment_slot::EquipmentSlot;
use crate::repositories::asset_repo::ASSET_COLUMNS;

/// Column list for `equipment_slots` queries.
const SLOT_COLUMNS: &str = "\
    id, nft_uuid, slot_name, equipped_child_uuid, required_trait, created_at";

/// Executes containment graph operations.
pub struct ContainmentRepo;

impl ContainmentRepo {
    // -----------------------------------------------------------------------
    // Nesting
    // -----------------------------------------------------------------------

    /// Nest `child_uuid` under `parent_uuid`.
    ///
    /// On success the child records its current owner in
    /// `owner_before_nesting` and takes the parent's owner as its own.
    /// Returns the updated child row.
    pub async fn nest(
        pool: &PgPool,
        parent_uuid: &str,
        child_uuid: &str,
    ) -> Result<Asset, StoreError> {
        if parent_uuid == child_uuid {
            return Err(GraphError::SelfNesting(child_uuid.to_string()).into());
        }

        let mut tx = pool.begin().await?;

        let (parent, child) = lock_pair(&mut *tx, parent_uuid, child_uuid).await?;

        // Ancestor chain of the parent, parent included. Walked inside the
        // transaction so the cycle check sees the same snapshot the update
        // will apply to.
        let ancestry: Vec<String> = sqlx::query_scalar(
            "WITH RECURSIVE chain AS (\
                 SELECT uuid, parent_uuid FROM nft_assets WHERE uuid = $1 \
                 UNION ALL \
                 SELECT a.uuid, a.parent_uuid FROM nft_assets a \
                 JOIN chain c ON a.uuid = c.parent_uuid\
             ) SELECT uuid FROM chain",
        )
        .bind(parent_uuid)
        .fetch_all(&mut *tx)
        .await?;

        containment::ensure_nestable(
            parent_uuid,
            child_uuid,
            child.parent_uuid.as_deref(),
            &ancestry,
        )?;

        let query = format!(
            "UPDATE nft_assets SET \
                parent_uuid = $1, \
                owner_before_nesting = owner_account, \
                owner_account = $2, \
                updated_at = now() \
             WHERE uuid = $3 \
             RETURNING {ASSET_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Asset>(&query)
            .bind(parent_uuid)
            .bind(&parent.owner_account)
            .bind(child_uuid)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Un-nest `child_uuid` from `parent_uuid`.
    ///
    /// Rejected while any equipment slot still references the child as its
    /// occupant. On success the parent reference is cleared and ownership
    /// reverts to the recorded pre-nesting owner.
    pub async fn unnest(
        pool: &PgPool,
        parent_uuid: &str,
        child_uuid: &str,
    ) -> Result<Asset, StoreError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {ASSET_COLUMNS} FROM nft_assets WHERE uuid = $1 FOR UPDATE"
        );
        let child = sqlx::query_as::<_, Asset>(&query)
            .bind(child_uuid)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| GraphError::AssetNotFound(child_uuid.to_string()))?;

        let referencing_slots: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM equipment_slots WHERE equipped_child_uuid = $1",
        )
        .bind(child_uuid)
        .fetch_one(&mut *tx)
        .await?;

        containment::ensure_unnestable(
            parent_uuid,
            child_uuid,
            child.parent_uuid.as_deref(),
            referencing_slots,
        )?;

        let query = format!(
            "UPDATE nft_assets SET \
                parent_uuid = NULL, \
                owner_account = COALESCE(owner_before_nesting, owner_account), \
                owner_before_nesting = NULL, \
                updated_at = now() \
             WHERE uuid = $1 \
             RETURNING {ASSET_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Asset>(&query)
            .bind(child_uuid)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Equipping
    // -----------------------------------------------------------------------

    /// Equip `child_uuid` into slot `slot_name` on `host_uuid`, replacing
    /// any previous occupant (which stays nested). Returns the updated
    /// slot row.
    pub async fn equip(
        pool: &PgPool,
        host_uuid: &str,
        slot_name: &str,
        child_uuid: &str,
    ) -> Result<EquipmentSlot, StoreError> {
        let mut tx = pool.begin().await?;

        let (_host, child) = lock_pair(&mut *tx, host_uuid, child_uuid).await?;

        let slot_query = format!(
            "SELECT {SLOT_COLUMNS} FROM equipment_slots \
             WHERE nft_uuid = $1 AND slot_name = $2 FOR UPDATE"
        );
        let slot = sqlx::query_as::<_, EquipmentSlot>(&slot_query)
            .bind(host_uuid)
            .bind(slot_name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| GraphError::SlotNotFound {
                host_uuid: host_uuid.to_string(),
                slot_name: slot_name.to_string(),
            })?;

        let child_state: Vec<(String, String)> = sqlx::query_as(
            "SELECT state_key, state_value FROM custom_state WHERE nft_uuid = $1",
        )
        .bind(child_uuid)
        .fetch_all(&mut *tx)
        .await?;

        containment::ensure_equippable(
            host_uuid,
            child_uuid,
            child.parent_uuid.as_deref(),
            slot.required_trait.as_deref(),
            &child_state,
        )?;

        let update_query = format!(
            "UPDATE equipment_slots SET equipped_child_uuid = $1 \
             WHERE id = $2 \
             RETURNING {SLOT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, EquipmentSlot>(&update_query)
            .bind(child_uuid)
            .bind(slot.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Clear the occupant of slot `slot_name` on `host_uuid`. Idempotent:
    /// unequipping an already-empty slot is a no-op success.
    pub async fn unequip(
        pool: &PgPool,
        host_uuid: &str,
        slot_name: &str,
    ) -> Result<EquipmentSlot, StoreError> {
        let query = format!(
            "UPDATE equipment_slots SET equipped_child_uuid = NULL \
             WHERE nft_uuid = $1 AND slot_name = $2 \
             RETURNING {SLOT_COLUMNS}"
        );
        let slot = sqlx::query_as::<_, EquipmentSlot>(&query)
            .bind(host_uuid)
            .bind(slot_name)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| GraphError::SlotNotFound {
                host_uuid: host_uuid.to_string(),
                slot_name: slot_name.to_string(),
            })?;
        Ok(slot)
    }

    /// All equipment slots hosted by the given asset.
    pub async fn slots_for_asset(
        pool: &PgPool,
        nft_uuid: &str,
    ) -> Result<Vec<EquipmentSlot>, StoreError> {
        let query = format!(
            "SELECT {SLOT_COLUMNS} FROM equipment_slots \
             WHERE nft_uuid = $1 ORDER BY slot_name"
        );
        let slots = sqlx::query_as::<_, EquipmentSlot>(&query)
            .bind(nft_uuid)
            .fetch_all(pool)
            .await?;
        Ok(slots)
    }

    // -----------------------------------------------------------------------
    // Delegation
    // -----------------------------------------------------------------------

    /// Set a delegation, overwriting any prior one. Expiry validation is
    /// the caller's responsibility (it needs no database state).
    pub async fn delegate(
        pool: &PgPool,
        uuid: &str,
        input: &DelegateAsset,
    ) -> Result<Asset, StoreError> {
        let query = format!(
            "UPDATE nft_assets SET \
                delegated_user = $2, \
                delegation_expires_at_block = $3, \
                delegated_at_block = $4, \
                updated_at = now() \
             WHERE uuid = $1 \
             RETURNING {ASSET_COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(uuid)
            .bind(&input.delegated_user)
            .bind(input.expires_at_block)
            .bind(input.current_block)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| GraphError::AssetNotFound(uuid.to_string()))?;
        Ok(asset)
    }

    /// Clear any delegation. Idempotent: revoking an undelegated asset is
    /// a no-op success.
    pub async fn revoke_delegation(pool: &PgPool, uuid: &str) -> Result<Asset, StoreError> {
        let query = format!(
            "UPDATE nft_assets SET \
                delegated_user = NULL, \
                delegation_expires_at_block = NULL, \
                delegated_at_block = NULL, \
                updated_at = now() \
             WHERE uuid = $1 \
             RETURNING {ASSET_COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| GraphError::AssetNotFound(uuid.to_string()))?;
        Ok(asset)
    }
}

/// Lock two asset rows in uuid order and return them as `(first, second)`
/// matching the argument order. Fails with `AssetNotFound` naming the
/// missing uuid.
async fn lock_pair(
    tx: &mut PgConnection,
    first_uuid: &str,
    second_uuid: &str,
) -> Result<(Asset, Asset), StoreError> {
    let query = format!(
        "SELECT {ASSET_COLUMNS} FROM nft_assets \
         WHERE uuid IN ($1, $2) ORDER BY uuid FOR UPDATE"
    );
    let rows = sqlx::query_as::<_, Asset>(&query)
        .bind(first_uuid)
        .bind(second_uuid)
        .fetch_all(&mut *tx)
        .await?;

    let first = rows
        .iter()
        .find(|a| a.uuid == first_uuid)
        .cloned()
        .ok_or_else(|| GraphError::AssetNotFound(first_uuid.to_string()))?;
    let second = rows
        .iter()
        .find(|a| a.uuid == second_uuid)
        .cloned()
        .ok_or_else(|| GraphError::AssetNotFound(second_uuid.to_string()))?;

    Ok((first, second))
}
