//! Type definitions for the inventory domain.

use chrono::{DateTime, Utc};
use parstock_core::{
    CleanerId, ItemId, OwnerId, OwnerScoped, PropertyId, ReportId, WarehouseItemId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical comparison key for item names: trimmed and lower-cased.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// ============================================================================
// Catalog
// ============================================================================

/// A trackable item configured for a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySetting {
    pub id: ItemId,
    pub item_name: String,
    /// Target quantity.
    pub par_level: i32,
    /// Counts strictly below this are a shortage. Never above `par_level`.
    pub low_stock_threshold: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<Decimal>,
}

/// A rental property and its embedded catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: OwnerId,
    pub name: String,
    pub address: Option<String>,
    /// Settings in catalog order.
    pub settings: Vec<InventorySetting>,
    /// Bumped on every settings write.
    pub catalog_version: i64,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Property {
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.settings.len()
    }

    /// Point-in-time copy of the catalog.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            property_id: self.id,
            owner_id: self.owner_id,
            version: self.catalog_version,
            settings: self.settings.clone(),
        }
    }
}

impl OwnerScoped for Property {
    fn owner_id(&self) -> OwnerId {
        self.owner_id
    }
}

/// Read-only copy of a property's settings taken when a submission is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub property_id: PropertyId,
    pub owner_id: OwnerId,
    pub version: i64,
    pub settings: Vec<InventorySetting>,
}

// ============================================================================
// Reports
// ============================================================================

/// Per-item outcome of a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Counted at or above par.
    Ok,
    /// At or above the threshold but below par.
    Low,
    /// Below the low-stock threshold.
    Shortage,
    /// Present in the catalog but absent from the submission.
    NotCounted,
}

impl ItemStatus {
    /// Whether the item needs restocking attention.
    #[must_use]
    pub fn needs_restock(self) -> bool {
        matches!(self, Self::Low | Self::Shortage)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Low => write!(f, "low"),
            Self::Shortage => write!(f, "shortage"),
            Self::NotCounted => write!(f, "not_counted"),
        }
    }
}

/// One line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportItemResult {
    /// Catalog spelling of the item name.
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counted_quantity: Option<i32>,
    pub expected_par_level: i32,
    pub low_stock_threshold: i32,
    pub status: ItemStatus,
    pub shortage_amount: i32,
}

/// Immutable record of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub property_id: PropertyId,
    pub owner_id: OwnerId,
    /// Cleaner that submitted the counts, when submitted by a cleaner.
    pub cleaner_id: Option<CleanerId>,
    pub submitted_at: DateTime<Utc>,
    pub notes: Option<String>,
    /// Catalog version the counts were reconciled against.
    pub catalog_version: i64,
    pub items: Vec<ReportItemResult>,
    pub has_shortages: bool,
    pub has_low_stock_alerts: bool,
}

impl OwnerScoped for Report {
    fn owner_id(&self) -> OwnerId {
        self.owner_id
    }
}

/// A stored report as seen by readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub report: Report,
    /// The report's property has since been deleted.
    pub orphaned: bool,
}

// ============================================================================
// Warehouse
// ============================================================================

/// Owner-level stock kept outside any property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseItem {
    pub id: WarehouseItemId,
    pub owner_id: OwnerId,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: i32,
    pub par_level: i32,
    pub low_stock_threshold: i32,
    pub cost_per_unit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WarehouseItem {
    /// Derived on every read, never stored.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

impl OwnerScoped for WarehouseItem {
    fn owner_id(&self) -> OwnerId {
        self.owner_id
    }
}

// ============================================================================
// Cleaners
// ============================================================================

/// Cleaner account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanerStatus {
    Active,
    Inactive,
}

impl fmt::Display for CleanerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for CleanerStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown cleaner status: {other}")),
        }
    }
}

/// A cleaner managed by an owner account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cleaner {
    pub id: CleanerId,
    pub name: String,
    /// Owner account that manages this cleaner.
    pub manager_id: OwnerId,
    pub status: CleanerStatus,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl Cleaner {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == CleanerStatus::Active
    }
}

impl OwnerScoped for Cleaner {
    fn owner_id(&self) -> OwnerId {
        self.manager_id
    }
}
