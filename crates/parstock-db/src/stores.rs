//! PostgreSQL implementations of the inventory store traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parstock_core::{CleanerId, OwnerId, PropertyId, ReportId, WarehouseItemId};
use parstock_inventory::catalog::apply_edit;
use parstock_inventory::{
    CatalogEdit, Cleaner, CleanerStore, EditOutcome, InventoryError, Property, PropertyStore,
    Report, ReportStore, Result, ValidationError, WarehouseItem, WarehouseStore,
};

use crate::error::DbError;
use crate::models::{CleanerRow, InventoryReportRow, PropertyRow, WarehouseItemRow};
use crate::pool::DbPool;

fn query_failed(err: sqlx::Error) -> InventoryError {
    DbError::from(err).into()
}

// ============================================================================
// Properties
// ============================================================================

/// Property store backed by the `properties` table.
#[derive(Debug, Clone)]
pub struct PgPropertyStore {
    pool: DbPool,
}

impl PgPropertyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyStore for PgPropertyStore {
    async fn create(&self, property: Property, limit: Option<u32>) -> Result<Property> {
        let mut tx = self.pool.inner().begin().await.map_err(query_failed)?;
        let owner = property.owner_id.into_uuid();

        if let Some(limit) = limit {
            PropertyRow::lock_owner(&mut *tx, owner)
                .await
                .map_err(query_failed)?;
            let live = PropertyRow::count_live_by_owner(&mut *tx, owner)
                .await
                .map_err(query_failed)?;
            if live >= i64::from(limit) {
                return Err(InventoryError::PropertyLimitReached { limit });
            }
        }

        let row = PropertyRow::insert(&mut *tx, &property)
            .await
            .map_err(query_failed)?;
        tx.commit().await.map_err(query_failed)?;
        Ok(row.into())
    }

    async fn get(&self, id: PropertyId) -> Result<Option<Property>> {
        let row = PropertyRow::find_by_id(self.pool.inner(), id.into_uuid())
            .await
            .map_err(query_failed)?;
        Ok(row.map(Property::from))
    }

    async fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<Property>> {
        let rows = PropertyRow::list_live_by_owner(self.pool.inner(), owner_id.into_uuid())
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(Property::from).collect())
    }

    async fn edit_catalog(&self, id: PropertyId, edit: &CatalogEdit) -> Result<Property> {
        let mut tx = self.pool.inner().begin().await.map_err(query_failed)?;
        let row = PropertyRow::find_live_for_update(&mut *tx, id.into_uuid())
            .await
            .map_err(query_failed)?
            .ok_or(InventoryError::PropertyNotFound(id))?;

        let mut settings = row.settings.0;
        match apply_edit(&mut settings, edit)? {
            EditOutcome::Applied => {}
            EditOutcome::ItemMissing => return Err(InventoryError::ItemNotFound(edit.item_id())),
        }

        let updated = PropertyRow::update_settings(&mut *tx, id.into_uuid(), &settings)
            .await
            .map_err(query_failed)?;
        tx.commit().await.map_err(query_failed)?;
        Ok(updated.into())
    }

    async fn soft_delete(&self, id: PropertyId, at: DateTime<Utc>) -> Result<bool> {
        PropertyRow::soft_delete(self.pool.inner(), id.into_uuid(), at)
            .await
            .map_err(query_failed)
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Report store backed by the `inventory_reports` table.
#[derive(Debug, Clone)]
pub struct PgReportStore {
    pool: DbPool,
}

impl PgReportStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn save(&self, report: &Report) -> Result<ReportId> {
        let id = InventoryReportRow::insert(self.pool.inner(), report)
            .await
            .map_err(query_failed)?;
        Ok(ReportId::from_uuid(id))
    }

    async fn list_by_property(&self, property_id: PropertyId) -> Result<Vec<Report>> {
        let rows = InventoryReportRow::list_by_property(self.pool.inner(), property_id.into_uuid())
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(Report::from).collect())
    }

    async fn get(&self, id: ReportId) -> Result<Option<Report>> {
        let row = InventoryReportRow::find_by_id(self.pool.inner(), id.into_uuid())
            .await
            .map_err(query_failed)?;
        Ok(row.map(Report::from))
    }
}

// ============================================================================
// Warehouse
// ============================================================================

/// Warehouse store backed by the `warehouse_items` table.
#[derive(Debug, Clone)]
pub struct PgWarehouseStore {
    pool: DbPool,
}

impl PgWarehouseStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarehouseStore for PgWarehouseStore {
    async fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<WarehouseItem>> {
        let rows = WarehouseItemRow::list_by_owner(self.pool.inner(), owner_id.into_uuid())
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(WarehouseItem::from).collect())
    }

    async fn create(&self, item: WarehouseItem) -> Result<WarehouseItem> {
        let row = WarehouseItemRow::insert(self.pool.inner(), &item)
            .await
            .map_err(query_failed)?;
        Ok(row.into())
    }

    async fn adjust_quantity(
        &self,
        owner_id: OwnerId,
        id: WarehouseItemId,
        delta: i32,
    ) -> Result<Option<WarehouseItem>> {
        let (owner, item) = (owner_id.into_uuid(), id.into_uuid());
        if let Some(row) = WarehouseItemRow::adjust_quantity(self.pool.inner(), owner, item, delta)
            .await
            .map_err(query_failed)?
        {
            return Ok(Some(row.into()));
        }

        // Either the item is missing or the guard refused the update.
        match WarehouseItemRow::find_by_id(self.pool.inner(), owner, item)
            .await
            .map_err(query_failed)?
        {
            Some(existing) => Err(ValidationError::StockOutOfRange {
                quantity: existing.quantity,
                delta,
            }
            .into()),
            None => Ok(None),
        }
    }
}

// ============================================================================
// Cleaners
// ============================================================================

/// Cleaner directory backed by the `cleaners` table.
#[derive(Debug, Clone)]
pub struct PgCleanerStore {
    pool: DbPool,
}

impl PgCleanerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert or replace a cleaner record.
    pub async fn upsert(&self, cleaner: &Cleaner) -> Result<()> {
        CleanerRow::upsert(self.pool.inner(), cleaner)
            .await
            .map_err(query_failed)
    }
}

#[async_trait]
impl CleanerStore for PgCleanerStore {
    async fn get(&self, id: CleanerId) -> Result<Option<Cleaner>> {
        let row = CleanerRow::find_by_id(self.pool.inner(), id.into_uuid())
            .await
            .map_err(query_failed)?;
        match row {
            Some(row) => {
                let cleaner = Cleaner::try_from(row).map_err(|e| {
                    tracing::error!(cleaner_id = %id, error = %e, "Unreadable cleaner row");
                    InventoryError::from(e)
                })?;
                Ok(Some(cleaner))
            }
            None => Ok(None),
        }
    }
}
