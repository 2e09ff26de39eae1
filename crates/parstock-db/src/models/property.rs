//! Property model. The inventory catalog is embedded as a JSONB array.

use chrono::{DateTime, Utc};
use parstock_core::{OwnerId, PropertyId};
use parstock_inventory::{InventorySetting, Property};
use sqlx::types::Json;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

const COLUMNS: &str =
    "id, owner_id, name, address, settings, catalog_version, created_at, deleted_at";

/// A row of `properties`.
#[derive(Debug, Clone, FromRow)]
pub struct PropertyRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub settings: Json<Vec<InventorySetting>>,
    pub catalog_version: i64,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: PropertyId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            name: row.name,
            address: row.address,
            settings: row.settings.0,
            catalog_version: row.catalog_version,
            created_at: row.created_at,
            deleted_at: row.deleted_at,
        }
    }
}

impl PropertyRow {
    /// Find a property by id, including soft-deleted ones.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM properties WHERE id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lock a live property row for a catalog write.
    pub async fn find_live_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM properties WHERE id = $1 AND deleted_at IS NULL FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Live properties of an owner, oldest first.
    pub async fn list_live_by_owner<'e>(
        executor: impl PgExecutor<'e>,
        owner_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM properties \
             WHERE owner_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at, id"
        ))
        .bind(owner_id)
        .fetch_all(executor)
        .await
    }

    /// Number of live properties an owner has.
    pub async fn count_live_by_owner<'e>(
        executor: impl PgExecutor<'e>,
        owner_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM properties WHERE owner_id = $1 AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .fetch_one(executor)
        .await
    }

    /// Serialise property creation per owner for the rest of the transaction.
    pub async fn lock_owner<'e>(
        executor: impl PgExecutor<'e>,
        owner_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(owner_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Insert a property.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        property: &Property,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO properties \
             (id, owner_id, name, address, settings, catalog_version, created_at, deleted_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        ))
        .bind(property.id.into_uuid())
        .bind(property.owner_id.into_uuid())
        .bind(&property.name)
        .bind(&property.address)
        .bind(Json(&property.settings))
        .bind(property.catalog_version)
        .bind(property.created_at)
        .bind(property.deleted_at)
        .fetch_one(executor)
        .await
    }

    /// Replace the catalog and bump its version.
    pub async fn update_settings<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        settings: &[InventorySetting],
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE properties \
             SET settings = $2, catalog_version = catalog_version + 1 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(Json(settings))
        .fetch_one(executor)
        .await
    }

    /// Mark a live property deleted. Returns whether a row changed.
    pub async fn soft_delete<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE properties SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(at)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
