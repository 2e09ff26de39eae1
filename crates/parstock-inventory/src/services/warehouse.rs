//! Owner warehouse stock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parstock_auth::Caller;
use parstock_core::{OwnerId, WarehouseItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::access::AccessGate;
use crate::catalog::unit_cost_in_range;
use crate::error::{InventoryError, Result, ValidationError};
use crate::types::WarehouseItem;

/// Input for a new warehouse item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWarehouseItem {
    pub name: String,
    pub sku: Option<String>,
    pub quantity: i32,
    pub par_level: i32,
    pub low_stock_threshold: i32,
    pub cost_per_unit: Option<Decimal>,
}

impl NewWarehouseItem {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidItemName(
                "must not be empty".to_string(),
            ));
        }
        for (field, value) in [
            ("quantity", self.quantity),
            ("parLevel", self.par_level),
            ("lowStockThreshold", self.low_stock_threshold),
        ] {
            if value < 0 {
                return Err(ValidationError::invalid_quantity(
                    field,
                    "must not be negative",
                ));
            }
        }
        if self.low_stock_threshold > self.par_level {
            return Err(ValidationError::ThresholdExceedsParLevel {
                item: self.name.trim().to_string(),
                par_level: self.par_level,
                threshold: self.low_stock_threshold,
            });
        }
        if self.cost_per_unit.is_some_and(|c| !unit_cost_in_range(c)) {
            return Err(ValidationError::InvalidUnitCost);
        }
        Ok(())
    }
}

/// Trait for warehouse storage backends.
#[async_trait]
pub trait WarehouseStore: Send + Sync {
    /// An owner's items ordered by name.
    async fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<WarehouseItem>>;

    /// Insert a new item.
    async fn create(&self, item: WarehouseItem) -> Result<WarehouseItem>;

    /// Add `delta` to an item's quantity atomically.
    ///
    /// Returns `Ok(None)` if the item does not exist for this owner and
    /// `StockOutOfRange` if the result would drop below zero or overflow.
    async fn adjust_quantity(
        &self,
        owner_id: OwnerId,
        id: WarehouseItemId,
        delta: i32,
    ) -> Result<Option<WarehouseItem>>;
}

/// In-memory warehouse store for testing.
#[derive(Debug, Default)]
pub struct InMemoryWarehouseStore {
    items: Arc<RwLock<HashMap<WarehouseItemId, WarehouseItem>>>,
}

impl InMemoryWarehouseStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WarehouseStore for InMemoryWarehouseStore {
    async fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<WarehouseItem>> {
        let items = self.items.read().await;
        let mut results: Vec<_> = items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(results)
    }

    async fn create(&self, item: WarehouseItem) -> Result<WarehouseItem> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn adjust_quantity(
        &self,
        owner_id: OwnerId,
        id: WarehouseItemId,
        delta: i32,
    ) -> Result<Option<WarehouseItem>> {
        let mut items = self.items.write().await;
        let Some(item) = items.get_mut(&id).filter(|i| i.owner_id == owner_id) else {
            return Ok(None);
        };
        let quantity = item
            .quantity
            .checked_add(delta)
            .filter(|q| *q >= 0)
            .ok_or(ValidationError::StockOutOfRange {
                quantity: item.quantity,
                delta,
            })?;
        item.quantity = quantity;
        item.updated_at = Utc::now();
        Ok(Some(item.clone()))
    }
}

/// Service for an owner's warehouse.
pub struct WarehouseService {
    store: Arc<dyn WarehouseStore>,
    access: AccessGate,
}

impl WarehouseService {
    pub fn new(store: Arc<dyn WarehouseStore>, access: AccessGate) -> Self {
        Self { store, access }
    }

    /// The caller's warehouse items.
    pub async fn list(&self, caller: &Caller) -> Result<Vec<WarehouseItem>> {
        let owner_id = self.access.require_owner(caller)?;
        self.store.list_by_owner(owner_id).await
    }

    /// Add a warehouse item.
    pub async fn create(&self, caller: &Caller, input: NewWarehouseItem) -> Result<WarehouseItem> {
        let owner_id = self.access.require_owner(caller)?;
        input.validate()?;

        let now = Utc::now();
        let item = WarehouseItem {
            id: WarehouseItemId::new(),
            owner_id,
            name: input.name.trim().to_string(),
            sku: input
                .sku
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            quantity: input.quantity,
            par_level: input.par_level,
            low_stock_threshold: input.low_stock_threshold,
            cost_per_unit: input.cost_per_unit,
            created_at: now,
            updated_at: now,
        };
        let item = self.store.create(item).await?;
        tracing::info!(owner_id = %owner_id, warehouse_item_id = %item.id, "Warehouse item created");
        Ok(item)
    }

    /// Move stock in (positive delta) or out (negative delta).
    pub async fn adjust(
        &self,
        caller: &Caller,
        id: WarehouseItemId,
        delta: i32,
    ) -> Result<WarehouseItem> {
        let owner_id = self.access.require_owner(caller)?;
        let item = self
            .store
            .adjust_quantity(owner_id, id, delta)
            .await?
            .ok_or(InventoryError::WarehouseItemNotFound(id))?;
        tracing::info!(
            owner_id = %owner_id,
            warehouse_item_id = %id,
            delta,
            quantity = item.quantity,
            "Warehouse stock adjusted"
        );
        Ok(item)
    }
}
