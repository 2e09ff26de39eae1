//! Inventory catalog: setting validation and catalog edits.
//!
//! Every write goes through [`apply_edit`], which checks the full catalog
//! after the change and leaves it untouched on failure. Stores call it while
//! holding the property's write lock (or row lock) and bump the catalog
//! version only when it succeeds.

use parstock_core::ItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{name_key, InventorySetting};

const MAX_NAME_LEN: usize = 200;

/// Largest accepted unit cost for settings and warehouse items.
pub const MAX_UNIT_COST: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Whether `cost` is an acceptable unit cost.
#[must_use]
pub fn unit_cost_in_range(cost: Decimal) -> bool {
    cost >= Decimal::ZERO && cost <= MAX_UNIT_COST
}

/// Input for a new inventory setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSetting {
    pub item_name: String,
    pub par_level: i32,
    pub low_stock_threshold: i32,
    #[serde(default)]
    pub unit_cost: Option<Decimal>,
}

impl NewSetting {
    /// Validate and assign an id.
    pub fn into_setting(self) -> Result<InventorySetting, ValidationError> {
        let setting = InventorySetting {
            id: ItemId::new(),
            item_name: self.item_name.trim().to_string(),
            par_level: self.par_level,
            low_stock_threshold: self.low_stock_threshold,
            unit_cost: self.unit_cost,
        };
        validate_setting(&setting)?;
        Ok(setting)
    }
}

/// Partial update of an inventory setting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingPatch {
    pub item_name: Option<String>,
    pub par_level: Option<i32>,
    pub low_stock_threshold: Option<i32>,
    pub unit_cost: Option<Decimal>,
}

/// A single catalog write.
#[derive(Debug, Clone)]
pub enum CatalogEdit {
    Add(InventorySetting),
    Update { item_id: ItemId, patch: SettingPatch },
    Remove(ItemId),
}

impl CatalogEdit {
    /// Id of the setting this edit touches.
    #[must_use]
    pub fn item_id(&self) -> ItemId {
        match self {
            CatalogEdit::Add(setting) => setting.id,
            CatalogEdit::Update { item_id, .. } | CatalogEdit::Remove(item_id) => *item_id,
        }
    }
}

/// Outcome of applying an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// The edit referenced an item id that is not in the catalog.
    ItemMissing,
}

/// Check a single setting in isolation.
pub fn validate_setting(setting: &InventorySetting) -> Result<(), ValidationError> {
    validate_item_name(&setting.item_name)?;
    if setting.par_level < 0 {
        return Err(ValidationError::invalid_quantity(
            "parLevel",
            "must not be negative",
        ));
    }
    if setting.low_stock_threshold < 0 {
        return Err(ValidationError::invalid_quantity(
            "lowStockThreshold",
            "must not be negative",
        ));
    }
    if setting.low_stock_threshold > setting.par_level {
        return Err(ValidationError::ThresholdExceedsParLevel {
            item: setting.item_name.clone(),
            par_level: setting.par_level,
            threshold: setting.low_stock_threshold,
        });
    }
    if setting.unit_cost.is_some_and(|cost| !unit_cost_in_range(cost)) {
        return Err(ValidationError::InvalidUnitCost);
    }
    Ok(())
}

fn validate_item_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidItemName(
            "must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::InvalidItemName(format!(
            "must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Reject catalogs where two settings share a name.
pub fn check_unique_names(settings: &[InventorySetting]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::with_capacity(settings.len());
    for setting in settings {
        if !seen.insert(name_key(&setting.item_name)) {
            return Err(ValidationError::DuplicateItemInCatalog(
                setting.item_name.clone(),
            ));
        }
    }
    Ok(())
}

/// Apply `edit` to `settings`. On any error `settings` is unchanged.
pub fn apply_edit(
    settings: &mut Vec<InventorySetting>,
    edit: &CatalogEdit,
) -> Result<EditOutcome, ValidationError> {
    let mut next = settings.clone();
    match edit {
        CatalogEdit::Add(setting) => {
            validate_setting(setting)?;
            next.push(setting.clone());
        }
        CatalogEdit::Update { item_id, patch } => {
            let Some(current) = next.iter_mut().find(|s| s.id == *item_id) else {
                return Ok(EditOutcome::ItemMissing);
            };
            if let Some(ref name) = patch.item_name {
                current.item_name = name.trim().to_string();
            }
            if let Some(par_level) = patch.par_level {
                current.par_level = par_level;
            }
            if let Some(threshold) = patch.low_stock_threshold {
                current.low_stock_threshold = threshold;
            }
            if let Some(cost) = patch.unit_cost {
                current.unit_cost = Some(cost);
            }
            validate_setting(current)?;
        }
        CatalogEdit::Remove(item_id) => {
            let before = next.len();
            next.retain(|s| s.id != *item_id);
            if next.len() == before {
                return Ok(EditOutcome::ItemMissing);
            }
        }
    }
    check_unique_names(&next)?;
    *settings = next;
    Ok(EditOutcome::Applied)
}

/// Validate a property name, returning the trimmed form.
pub fn validate_property_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidPropertyName(
            "must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::InvalidPropertyName(format!(
            "must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
