//! Warehouse item model.

use chrono::{DateTime, Utc};
use parstock_core::{OwnerId, WarehouseItemId};
use parstock_inventory::WarehouseItem;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

const COLUMNS: &str = "id, owner_id, name, sku, quantity, par_level, low_stock_threshold, \
                       cost_per_unit, created_at, updated_at";

/// A row of `warehouse_items`.
#[derive(Debug, Clone, FromRow)]
pub struct WarehouseItemRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: i32,
    pub par_level: i32,
    pub low_stock_threshold: i32,
    pub cost_per_unit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WarehouseItemRow> for WarehouseItem {
    fn from(row: WarehouseItemRow) -> Self {
        WarehouseItem {
            id: WarehouseItemId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            name: row.name,
            sku: row.sku,
            quantity: row.quantity,
            par_level: row.par_level,
            low_stock_threshold: row.low_stock_threshold,
            cost_per_unit: row.cost_per_unit,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl WarehouseItemRow {
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM warehouse_items WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await
    }

    pub async fn list_by_owner<'e>(
        executor: impl PgExecutor<'e>,
        owner_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM warehouse_items WHERE owner_id = $1 ORDER BY name, id"
        ))
        .bind(owner_id)
        .fetch_all(executor)
        .await
    }

    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        item: &WarehouseItem,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO warehouse_items ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        ))
        .bind(item.id.into_uuid())
        .bind(item.owner_id.into_uuid())
        .bind(&item.name)
        .bind(&item.sku)
        .bind(item.quantity)
        .bind(item.par_level)
        .bind(item.low_stock_threshold)
        .bind(item.cost_per_unit)
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(executor)
        .await
    }

    /// Apply `delta` unless the result would leave `[0, i32::MAX]`.
    ///
    /// Returns `None` both when the item is missing and when the adjustment
    /// was refused; callers tell the two apart with [`Self::find_by_id`].
    pub async fn adjust_quantity<'e>(
        executor: impl PgExecutor<'e>,
        owner_id: Uuid,
        id: Uuid,
        delta: i32,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE warehouse_items \
             SET quantity = quantity + $3, updated_at = now() \
             WHERE id = $1 AND owner_id = $2 \
               AND quantity::bigint + $3 BETWEEN 0 AND 2147483647 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .bind(delta)
        .fetch_optional(executor)
        .await
    }
}
