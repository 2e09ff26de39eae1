//! Error types for inventory operations.

use parstock_core::{ItemId, ParstockError, PropertyId, ReportId, WarehouseItemId};
use thiserror::Error;

/// Rejections of caller-supplied data. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The property has no inventory settings to reconcile against.
    #[error("Property has no inventory settings")]
    EmptyCatalog,

    /// A submitted item name is not in the property's catalog.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// A quantity is negative, non-integer or out of range.
    #[error("Invalid quantity for '{field}': {reason}")]
    InvalidQuantity { field: String, reason: String },

    /// Two catalog entries share a name (case-insensitive).
    #[error("Duplicate item in catalog: {0}")]
    DuplicateItemInCatalog(String),

    /// The same item appears more than once in one submission.
    #[error("Item submitted more than once: {0}")]
    DuplicateSubmittedItem(String),

    /// Catalog items were left uncounted while complete counts are required.
    #[error("Missing counts for: {}", .0.join(", "))]
    MissingItems(Vec<String>),

    /// Low-stock threshold above par level.
    #[error("Low-stock threshold {threshold} exceeds par level {par_level} for '{item}'")]
    ThresholdExceedsParLevel {
        item: String,
        par_level: i32,
        threshold: i32,
    },

    /// Blank or over-long item name.
    #[error("Invalid item name: {0}")]
    InvalidItemName(String),

    /// Unit cost outside `0..=MAX_UNIT_COST`.
    #[error("Unit cost must be between 0 and 1000000")]
    InvalidUnitCost,

    /// Blank or over-long property name.
    #[error("Invalid property name: {0}")]
    InvalidPropertyName(String),

    /// Generic field-level rejection.
    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// A stock adjustment would take a warehouse quantity below zero or past
    /// `i32::MAX`.
    #[error("Adjustment of {delta} to {quantity} units is out of range")]
    StockOutOfRange { quantity: i32, delta: i32 },
}

impl ValidationError {
    /// Stable machine-readable code for API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyCatalog => "empty_catalog",
            ValidationError::UnknownItem(_) => "unknown_item",
            ValidationError::InvalidQuantity { .. } => "invalid_quantity",
            ValidationError::DuplicateItemInCatalog(_) => "duplicate_item_in_catalog",
            ValidationError::DuplicateSubmittedItem(_) => "duplicate_submitted_item",
            ValidationError::MissingItems(_) => "missing_items",
            ValidationError::ThresholdExceedsParLevel { .. } => "threshold_exceeds_par_level",
            ValidationError::InvalidItemName(_) => "invalid_item_name",
            ValidationError::InvalidUnitCost => "invalid_unit_cost",
            ValidationError::InvalidPropertyName(_) => "invalid_property_name",
            ValidationError::InvalidField { .. } => "invalid_field",
            ValidationError::StockOutOfRange { .. } => "stock_out_of_range",
        }
    }

    pub(crate) fn invalid_quantity(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidQuantity {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by inventory services and stores.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),

    #[error("Inventory item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Report not found: {0}")]
    ReportNotFound(ReportId),

    #[error("Warehouse item not found: {0}")]
    WarehouseItemNotFound(WarehouseItemId),

    #[error("{0}")]
    NotFound(String),

    /// No usable caller identity.
    #[error("Authentication required")]
    Unauthorized,

    /// The caller is known but may not touch this record.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// The owner's plan does not allow another property.
    #[error("Plan allows at most {limit} properties")]
    PropertyLimitReached { limit: u32 },

    /// Persistence failure. Callers are told the operation did not complete.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl InventoryError {
    /// Wrap any storage-layer error.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        InventoryError::Storage(err.to_string())
    }
}

impl From<ParstockError> for InventoryError {
    fn from(err: ParstockError) -> Self {
        match err {
            ParstockError::Unauthorized { .. } => InventoryError::Unauthorized,
            ParstockError::OwnerMismatch { .. } => {
                InventoryError::Forbidden("record belongs to another owner".to_string())
            }
            other @ ParstockError::NotFound { .. } => InventoryError::NotFound(other.to_string()),
            ParstockError::ValidationError { field, message } => {
                ValidationError::InvalidField { field, message }.into()
            }
        }
    }
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
