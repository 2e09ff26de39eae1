//! Property and catalog management.
//!
//! This module provides the [`PropertyStore`] trait, an in-memory store for
//! tests, and the [`CatalogService`] that owners (and, read-only, their
//! cleaners) use to manage properties and inventory settings.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parstock_auth::Caller;
use parstock_core::{ItemId, OwnerId, PropertyId};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::access::{AccessGate, PropertyAction};
use crate::catalog::{
    apply_edit, validate_property_name, CatalogEdit, EditOutcome, NewSetting, SettingPatch,
};
use crate::error::{InventoryError, Result};
use crate::plan::PlanGate;
use crate::types::{InventorySetting, Property};

// ============================================================================
// Inputs
// ============================================================================

/// Input for creating a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub name: String,
    pub address: Option<String>,
}

// ============================================================================
// Store Trait
// ============================================================================

/// Trait for property storage backends.
///
/// Catalog writes are serialised per property: implementations apply
/// [`apply_edit`] under a write lock and bump `catalog_version` only when it
/// succeeds.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Insert a property unless the owner already has `limit` live ones.
    async fn create(&self, property: Property, limit: Option<u32>) -> Result<Property>;

    /// Get a property by id, including soft-deleted ones.
    async fn get(&self, id: PropertyId) -> Result<Option<Property>>;

    /// Live properties of an owner, oldest first.
    async fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<Property>>;

    /// Apply one catalog edit atomically and return the updated property.
    async fn edit_catalog(&self, id: PropertyId, edit: &CatalogEdit) -> Result<Property>;

    /// Soft-delete a property. Returns false if it was missing or already deleted.
    async fn soft_delete(&self, id: PropertyId, at: DateTime<Utc>) -> Result<bool>;
}

// ============================================================================
// In-Memory Store (for testing)
// ============================================================================

/// In-memory property store for testing.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    properties: Arc<RwLock<HashMap<PropertyId, Property>>>,
}

impl InMemoryPropertyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn create(&self, property: Property, limit: Option<u32>) -> Result<Property> {
        let mut properties = self.properties.write().await;
        if let Some(limit) = limit {
            let live = properties
                .values()
                .filter(|p| p.owner_id == property.owner_id && !p.is_deleted())
                .count();
            if live >= limit as usize {
                return Err(InventoryError::PropertyLimitReached { limit });
            }
        }
        properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn get(&self, id: PropertyId) -> Result<Option<Property>> {
        Ok(self.properties.read().await.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<Property>> {
        let properties = self.properties.read().await;
        let mut results: Vec<_> = properties
            .values()
            .filter(|p| p.owner_id == owner_id && !p.is_deleted())
            .cloned()
            .collect();
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(results)
    }

    async fn edit_catalog(&self, id: PropertyId, edit: &CatalogEdit) -> Result<Property> {
        let mut properties = self.properties.write().await;
        let property = properties
            .get_mut(&id)
            .filter(|p| !p.is_deleted())
            .ok_or(InventoryError::PropertyNotFound(id))?;

        match apply_edit(&mut property.settings, edit)? {
            EditOutcome::Applied => {
                property.catalog_version += 1;
                Ok(property.clone())
            }
            EditOutcome::ItemMissing => Err(InventoryError::ItemNotFound(edit.item_id())),
        }
    }

    async fn soft_delete(&self, id: PropertyId, at: DateTime<Utc>) -> Result<bool> {
        let mut properties = self.properties.write().await;
        match properties.get_mut(&id) {
            Some(property) if !property.is_deleted() => {
                property.deleted_at = Some(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Service for managing properties and their inventory settings.
pub struct CatalogService {
    properties: Arc<dyn PropertyStore>,
    plan: Arc<dyn PlanGate>,
    access: AccessGate,
}

impl CatalogService {
    pub fn new(
        properties: Arc<dyn PropertyStore>,
        plan: Arc<dyn PlanGate>,
        access: AccessGate,
    ) -> Self {
        Self {
            properties,
            plan,
            access,
        }
    }

    /// Properties visible to the caller: an owner's own, or a cleaner's manager's.
    pub async fn list_properties(&self, caller: &Caller) -> Result<Vec<Property>> {
        let actor = self.access.resolve(caller).await?;
        self.properties.list_by_owner(actor.acting_owner()).await
    }

    /// Create a property, subject to the owner's plan limit.
    pub async fn create_property(&self, caller: &Caller, input: NewProperty) -> Result<Property> {
        let owner_id = self.access.require_owner(caller)?;
        let name = validate_property_name(&input.name)?;
        let limit = self.plan.max_properties(owner_id).await?;

        let property = Property {
            id: PropertyId::new(),
            owner_id,
            name,
            address: input
                .address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            settings: Vec::new(),
            catalog_version: 0,
            created_at: Utc::now(),
            deleted_at: None,
        };

        let property = self.properties.create(property, limit).await.inspect_err(|e| {
            if let InventoryError::PropertyLimitReached { limit } = e {
                tracing::info!(owner_id = %owner_id, limit, "Property limit reached");
            }
        })?;
        tracing::info!(owner_id = %owner_id, property_id = %property.id, "Property created");
        Ok(property)
    }

    /// The property with its catalog.
    pub async fn get_catalog(&self, caller: &Caller, property_id: PropertyId) -> Result<Property> {
        let property = self.live_property(property_id).await?;
        self.access
            .authorize(caller, &property, PropertyAction::ReadCatalog)
            .await?;
        Ok(property)
    }

    /// Add a setting to the catalog.
    pub async fn add_setting(
        &self,
        caller: &Caller,
        property_id: PropertyId,
        input: NewSetting,
    ) -> Result<InventorySetting> {
        self.authorize_manage(caller, property_id).await?;
        let setting = input.into_setting()?;
        let item_id = setting.id;
        let property = self
            .properties
            .edit_catalog(property_id, &CatalogEdit::Add(setting))
            .await?;
        tracing::info!(
            property_id = %property_id,
            item_id = %item_id,
            catalog_version = property.catalog_version,
            "Inventory setting added"
        );
        find_setting(&property, item_id)
    }

    /// Update a setting in place.
    pub async fn update_setting(
        &self,
        caller: &Caller,
        property_id: PropertyId,
        item_id: ItemId,
        patch: SettingPatch,
    ) -> Result<InventorySetting> {
        self.authorize_manage(caller, property_id).await?;
        let property = self
            .properties
            .edit_catalog(property_id, &CatalogEdit::Update { item_id, patch })
            .await?;
        tracing::info!(
            property_id = %property_id,
            item_id = %item_id,
            catalog_version = property.catalog_version,
            "Inventory setting updated"
        );
        find_setting(&property, item_id)
    }

    /// Remove a setting.
    pub async fn remove_setting(
        &self,
        caller: &Caller,
        property_id: PropertyId,
        item_id: ItemId,
    ) -> Result<()> {
        self.authorize_manage(caller, property_id).await?;
        let property = self
            .properties
            .edit_catalog(property_id, &CatalogEdit::Remove(item_id))
            .await?;
        tracing::info!(
            property_id = %property_id,
            item_id = %item_id,
            catalog_version = property.catalog_version,
            "Inventory setting removed"
        );
        Ok(())
    }

    /// Soft-delete a property. Its reports are kept.
    pub async fn delete_property(&self, caller: &Caller, property_id: PropertyId) -> Result<()> {
        self.authorize_manage(caller, property_id).await?;
        if !self.properties.soft_delete(property_id, Utc::now()).await? {
            return Err(InventoryError::PropertyNotFound(property_id));
        }
        tracing::info!(property_id = %property_id, "Property deleted");
        Ok(())
    }

    async fn live_property(&self, property_id: PropertyId) -> Result<Property> {
        self.properties
            .get(property_id)
            .await?
            .filter(|p| !p.is_deleted())
            .ok_or(InventoryError::PropertyNotFound(property_id))
    }

    async fn authorize_manage(&self, caller: &Caller, property_id: PropertyId) -> Result<()> {
        let property = self.live_property(property_id).await?;
        self.access
            .authorize(caller, &property, PropertyAction::Manage)
            .await?;
        Ok(())
    }
}

fn find_setting(property: &Property, item_id: ItemId) -> Result<InventorySetting> {
    property
        .settings
        .iter()
        .find(|s| s.id == item_id)
        .cloned()
        .ok_or(InventoryError::ItemNotFound(item_id))
}
