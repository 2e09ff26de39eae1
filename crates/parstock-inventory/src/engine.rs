//! Reconciliation engine.
//!
//! Compares submitted counts against a [`CatalogSnapshot`] and produces the
//! per-item results and report-level flags. Pure: no I/O, no clock, and the
//! same inputs always give the same output.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::check_unique_names;
use crate::error::ValidationError;
use crate::types::{name_key, CatalogSnapshot, ItemStatus, ReportItemResult};

/// How catalog items missing from a submission are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletenessPolicy {
    /// Missing items are recorded as `not_counted` and ignored by the flags.
    #[default]
    AllowPartial,
    /// Every catalog item must be counted.
    RequireComplete,
}

/// A validated count for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItemInput {
    item_name: String,
    counted_quantity: i32,
}

impl ReportItemInput {
    /// Build from an already-integral count.
    pub fn new(item_name: impl Into<String>, counted_quantity: i64) -> Result<Self, ValidationError> {
        let item_name = item_name.into();
        if counted_quantity < 0 {
            return Err(ValidationError::invalid_quantity(
                item_name,
                "must not be negative",
            ));
        }
        let counted_quantity = i32::try_from(counted_quantity)
            .map_err(|_| ValidationError::invalid_quantity(item_name.clone(), "too large"))?;
        Ok(Self {
            item_name,
            counted_quantity,
        })
    }

    /// Build from a raw JSON number, rejecting fractional values.
    pub fn from_json_number(
        item_name: impl Into<String>,
        counted: &serde_json::Number,
    ) -> Result<Self, ValidationError> {
        let item_name = item_name.into();
        if let Some(value) = counted.as_i64() {
            return Self::new(item_name, value);
        }
        if counted.is_u64() {
            return Err(ValidationError::invalid_quantity(item_name, "too large"));
        }
        match counted.as_f64() {
            Some(value) if value.is_finite() && value.fract() == 0.0 => {
                if value < 0.0 {
                    Err(ValidationError::invalid_quantity(
                        item_name,
                        "must not be negative",
                    ))
                } else if value > f64::from(i32::MAX) {
                    Err(ValidationError::invalid_quantity(item_name, "too large"))
                } else {
                    // Integral and within i32 range.
                    Self::new(item_name, value as i64)
                }
            }
            _ => Err(ValidationError::invalid_quantity(
                item_name,
                "must be a whole number",
            )),
        }
    }

    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    #[must_use]
    pub fn counted_quantity(&self) -> i32 {
        self.counted_quantity
    }
}

/// Output of [`reconcile`]; the caller stamps identity and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub catalog_version: i64,
    pub items: Vec<ReportItemResult>,
    pub has_shortages: bool,
    pub has_low_stock_alerts: bool,
}

/// Classify a count against its par level and low-stock threshold.
///
/// `shortage` below the threshold, `low` from the threshold up to par, `ok`
/// at or above par. When threshold equals par the `low` band is empty.
#[must_use]
pub fn classify(counted: i32, par_level: i32, low_stock_threshold: i32) -> ItemStatus {
    if counted < low_stock_threshold {
        ItemStatus::Shortage
    } else if counted < par_level {
        ItemStatus::Low
    } else {
        ItemStatus::Ok
    }
}

/// Reconcile submitted counts against a catalog snapshot.
///
/// Fails without a partial result on an empty or inconsistent catalog, an
/// unknown or repeated item, or (under
/// [`CompletenessPolicy::RequireComplete`]) uncounted catalog items. Results
/// follow catalog order and use the catalog's spelling of each name.
pub fn reconcile(
    snapshot: &CatalogSnapshot,
    submitted: &[ReportItemInput],
    policy: CompletenessPolicy,
) -> Result<Reconciliation, ValidationError> {
    if snapshot.settings.is_empty() {
        return Err(ValidationError::EmptyCatalog);
    }
    check_unique_names(&snapshot.settings)?;

    let known: HashMap<String, usize> = snapshot
        .settings
        .iter()
        .enumerate()
        .map(|(idx, s)| (name_key(&s.item_name), idx))
        .collect();

    let mut counts: Vec<Option<i32>> = vec![None; snapshot.settings.len()];
    for input in submitted {
        let idx = *known
            .get(&name_key(&input.item_name))
            .ok_or_else(|| ValidationError::UnknownItem(input.item_name.trim().to_string()))?;
        if counts[idx].is_some() {
            return Err(ValidationError::DuplicateSubmittedItem(
                snapshot.settings[idx].item_name.clone(),
            ));
        }
        counts[idx] = Some(input.counted_quantity);
    }

    if policy == CompletenessPolicy::RequireComplete {
        let missing: Vec<String> = snapshot
            .settings
            .iter()
            .zip(&counts)
            .filter(|(_, count)| count.is_none())
            .map(|(s, _)| s.item_name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingItems(missing));
        }
    }

    let items: Vec<ReportItemResult> = snapshot
        .settings
        .iter()
        .zip(counts)
        .map(|(setting, counted)| {
            let (status, shortage_amount) = match counted {
                Some(count) => (
                    classify(count, setting.par_level, setting.low_stock_threshold),
                    (setting.par_level - count).max(0),
                ),
                None => (ItemStatus::NotCounted, 0),
            };
            ReportItemResult {
                item_name: setting.item_name.clone(),
                counted_quantity: counted,
                expected_par_level: setting.par_level,
                low_stock_threshold: setting.low_stock_threshold,
                status,
                shortage_amount,
            }
        })
        .collect();

    let has_shortages = items.iter().any(|i| i.status == ItemStatus::Shortage);
    let has_low_stock_alerts = items.iter().any(|i| i.status.needs_restock());

    Ok(Reconciliation {
        catalog_version: snapshot.version,
        items,
        has_shortages,
        has_low_stock_alerts,
    })
}
