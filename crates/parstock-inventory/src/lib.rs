//! Inventory reconciliation domain logic.
//!
//! Cleaners count consumables at a rental property; this crate checks those
//! counts against the property's catalog of par levels and low-stock
//! thresholds, flags shortages and restock needs, and keeps the resulting
//! reports.
//!
//! # Modules
//!
//! - [`engine`] - Pure reconciliation of counts against a catalog snapshot
//! - [`catalog`] - Inventory setting validation and catalog edits
//! - [`access`] - Which callers may touch which properties
//! - [`restock`] - Restock plans from reports and warehouse stock
//! - [`plan`] - Subscription plan gate
//! - [`services`] - Store traits, in-memory stores and services
//!
//! # Example
//!
//! ```
//! use parstock_inventory::engine::{reconcile, CompletenessPolicy, ReportItemInput};
//! use parstock_inventory::types::{CatalogSnapshot, InventorySetting, ItemStatus};
//! use parstock_core::{ItemId, OwnerId, PropertyId};
//!
//! let snapshot = CatalogSnapshot {
//!     property_id: PropertyId::new(),
//!     owner_id: OwnerId::new(),
//!     version: 1,
//!     settings: vec![InventorySetting {
//!         id: ItemId::new(),
//!         item_name: "Towels".into(),
//!         par_level: 10,
//!         low_stock_threshold: 3,
//!         unit_cost: None,
//!     }],
//! };
//! let counts = vec![ReportItemInput::new("towels", 2).unwrap()];
//! let result = reconcile(&snapshot, &counts, CompletenessPolicy::AllowPartial).unwrap();
//!
//! assert_eq!(result.items[0].status, ItemStatus::Shortage);
//! assert_eq!(result.items[0].shortage_amount, 8);
//! assert!(result.has_shortages);
//! ```

pub mod access;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod plan;
pub mod restock;
pub mod services;
pub mod types;

pub use access::{AccessGate, Actor, CleanerSession, PropertyAction};
pub use catalog::{CatalogEdit, EditOutcome, NewSetting, SettingPatch};
pub use engine::{classify, reconcile, CompletenessPolicy, Reconciliation, ReportItemInput};
pub use error::{InventoryError, Result, ValidationError};
pub use plan::{PlanGate, StaticPlanGate};
pub use restock::{plan_restock, RestockLine, RestockPlan};
pub use services::{
    CatalogService, CleanerStore, InMemoryCleanerStore, InMemoryPropertyStore,
    InMemoryReportStore, InMemoryWarehouseStore, NewProperty, NewWarehouseItem, PropertyStore,
    ReconciliationService, ReportStore, Submission, WarehouseService, WarehouseStore,
};
pub use types::{
    name_key, CatalogSnapshot, Cleaner, CleanerStatus, InventorySetting, ItemStatus, Property,
    Report, ReportItemResult, ReportRecord, WarehouseItem,
};
