//! Restock planning from a stored report and the owner's warehouse.

use std::collections::HashMap;

use parstock_core::{PropertyId, ReportId, WarehouseItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{name_key, InventorySetting, ItemStatus, Report, WarehouseItem};

/// One item to bring back up to par.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockLine {
    pub item_name: String,
    pub status: ItemStatus,
    pub units_needed: i32,
    /// Warehouse record with the same name, if any.
    pub warehouse_item_id: Option<WarehouseItemId>,
    pub units_available: i32,
    pub units_fulfillable: i32,
    /// `units_needed * unit_cost` when the item has a unit cost and the
    /// product is representable.
    pub estimated_cost: Option<Decimal>,
}

/// Restock lines for every low or short item in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockPlan {
    pub report_id: ReportId,
    pub property_id: PropertyId,
    pub lines: Vec<RestockLine>,
    /// Sum of the known line costs, saturating at `Decimal::MAX`.
    pub total_estimated_cost: Decimal,
    /// Every line can be covered from the warehouse.
    pub fully_fulfillable: bool,
}

/// Derive a restock plan.
///
/// `catalog` supplies unit costs and is the property's current catalog, not
/// the snapshot the report was reconciled against: costs reflect today's
/// prices, and settings removed since the report have no cost. Lines follow
/// report order.
#[must_use]
pub fn plan_restock(
    report: &Report,
    catalog: &[InventorySetting],
    warehouse: &[WarehouseItem],
) -> RestockPlan {
    let costs: HashMap<String, Decimal> = catalog
        .iter()
        .filter_map(|s| s.unit_cost.map(|cost| (name_key(&s.item_name), cost)))
        .collect();

    let mut stock: HashMap<String, &WarehouseItem> = HashMap::new();
    for item in warehouse {
        stock.entry(name_key(&item.name)).or_insert(item);
    }

    let lines: Vec<RestockLine> = report
        .items
        .iter()
        .filter(|item| item.status.needs_restock())
        .map(|item| {
            let key = name_key(&item.item_name);
            let matched = stock.get(&key);
            let units_available = matched.map_or(0, |w| w.quantity.max(0));
            RestockLine {
                item_name: item.item_name.clone(),
                status: item.status,
                units_needed: item.shortage_amount,
                warehouse_item_id: matched.map(|w| w.id),
                units_available,
                units_fulfillable: item.shortage_amount.min(units_available),
                estimated_cost: costs
                    .get(&key)
                    .and_then(|cost| cost.checked_mul(Decimal::from(item.shortage_amount))),
            }
        })
        .collect();

    let total_estimated_cost = lines
        .iter()
        .filter_map(|l| l.estimated_cost)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let fully_fulfillable = lines.iter().all(|l| l.units_fulfillable == l.units_needed);

    RestockPlan {
        report_id: report.id,
        property_id: report.property_id,
        lines,
        total_estimated_cost,
        fully_fulfillable,
    }
}
