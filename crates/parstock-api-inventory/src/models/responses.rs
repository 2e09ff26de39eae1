//! Response models for the inventory API.

use chrono::{DateTime, Utc};
use parstock_assist::CountEstimate;
use parstock_inventory::{
    Cleaner, CleanerSession, InventorySetting, Property, Report, ReportItemResult, ReportRecord,
    RestockLine, RestockPlan, WarehouseItem,
};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Property as shown in listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    /// Number of tracked items, derived on read.
    pub item_count: usize,
}

impl From<&Property> for PropertySummaryResponse {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id.into_uuid(),
            name: property.name.clone(),
            address: property.address.clone(),
            item_count: property.item_count(),
        }
    }
}

/// A newly created property.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub item_count: usize,
    pub catalog_version: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id.into_uuid(),
            item_count: property.item_count(),
            name: property.name,
            address: property.address,
            catalog_version: property.catalog_version,
            created_at: property.created_at,
        }
    }
}

/// One inventory setting.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingResponse {
    pub id: Uuid,
    pub item_name: String,
    pub par_level: i32,
    pub low_stock_threshold: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub unit_cost: Option<Decimal>,
}

impl From<InventorySetting> for SettingResponse {
    fn from(setting: InventorySetting) -> Self {
        Self {
            id: setting.id.into_uuid(),
            item_name: setting.item_name,
            par_level: setting.par_level,
            low_stock_threshold: setting.low_stock_threshold,
            unit_cost: setting.unit_cost,
        }
    }
}

/// A property's catalog in catalog order.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub property_id: Uuid,
    pub name: String,
    pub catalog_version: i64,
    pub settings: Vec<SettingResponse>,
}

impl From<Property> for CatalogResponse {
    fn from(property: Property) -> Self {
        Self {
            property_id: property.id.into_uuid(),
            name: property.name,
            catalog_version: property.catalog_version,
            settings: property.settings.into_iter().map(Into::into).collect(),
        }
    }
}

/// One reconciled line of a report.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportItemResponse {
    pub item_name: String,
    /// Absent when the item was not counted.
    pub counted_quantity: Option<i32>,
    pub expected_par_level: i32,
    pub low_stock_threshold: i32,
    /// One of `ok`, `low`, `shortage`, `not_counted`.
    #[schema(example = "shortage")]
    pub status: String,
    pub shortage_amount: i32,
}

impl From<ReportItemResult> for ReportItemResponse {
    fn from(item: ReportItemResult) -> Self {
        Self {
            status: item.status.to_string(),
            item_name: item.item_name,
            counted_quantity: item.counted_quantity,
            expected_par_level: item.expected_par_level,
            low_stock_threshold: item.low_stock_threshold,
            shortage_amount: item.shortage_amount,
        }
    }
}

/// A stored inventory report.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report_id: Uuid,
    pub property_id: Uuid,
    pub cleaner_id: Option<Uuid>,
    pub submitted_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub catalog_version: i64,
    pub items: Vec<ReportItemResponse>,
    pub has_shortages: bool,
    pub has_low_stock_alerts: bool,
    /// The property has been deleted since submission.
    pub orphaned: bool,
}

impl ReportResponse {
    fn build(report: Report, orphaned: bool) -> Self {
        Self {
            report_id: report.id.into_uuid(),
            property_id: report.property_id.into_uuid(),
            cleaner_id: report.cleaner_id.map(|id| id.into_uuid()),
            submitted_at: report.submitted_at,
            notes: report.notes,
            catalog_version: report.catalog_version,
            items: report.items.into_iter().map(Into::into).collect(),
            has_shortages: report.has_shortages,
            has_low_stock_alerts: report.has_low_stock_alerts,
            orphaned,
        }
    }
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self::build(report, false)
    }
}

impl From<ReportRecord> for ReportResponse {
    fn from(record: ReportRecord) -> Self {
        Self::build(record.report, record.orphaned)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestockLineResponse {
    pub item_name: String,
    #[schema(example = "low")]
    pub status: String,
    pub units_needed: i32,
    pub warehouse_item_id: Option<Uuid>,
    pub units_available: i32,
    pub units_fulfillable: i32,
    #[schema(value_type = Option<String>)]
    pub estimated_cost: Option<Decimal>,
}

impl From<RestockLine> for RestockLineResponse {
    fn from(line: RestockLine) -> Self {
        Self {
            status: line.status.to_string(),
            item_name: line.item_name,
            units_needed: line.units_needed,
            warehouse_item_id: line.warehouse_item_id.map(|id| id.into_uuid()),
            units_available: line.units_available,
            units_fulfillable: line.units_fulfillable,
            estimated_cost: line.estimated_cost,
        }
    }
}

/// Restock lines for a report's low and short items.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestockPlanResponse {
    pub report_id: Uuid,
    pub property_id: Uuid,
    pub lines: Vec<RestockLineResponse>,
    #[schema(value_type = String)]
    pub total_estimated_cost: Decimal,
    pub fully_fulfillable: bool,
}

impl From<RestockPlan> for RestockPlanResponse {
    fn from(plan: RestockPlan) -> Self {
        Self {
            report_id: plan.report_id.into_uuid(),
            property_id: plan.property_id.into_uuid(),
            lines: plan.lines.into_iter().map(Into::into).collect(),
            total_estimated_cost: plan.total_estimated_cost,
            fully_fulfillable: plan.fully_fulfillable,
        }
    }
}

/// Warehouse stock with the low-stock flag derived on read.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseItemResponse {
    pub id: Uuid,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: i32,
    pub par_level: i32,
    pub low_stock_threshold: i32,
    #[schema(value_type = Option<String>)]
    pub cost_per_unit: Option<Decimal>,
    pub is_low_stock: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<WarehouseItem> for WarehouseItemResponse {
    fn from(item: WarehouseItem) -> Self {
        Self {
            is_low_stock: item.is_low_stock(),
            id: item.id.into_uuid(),
            name: item.name,
            sku: item.sku,
            quantity: item.quantity,
            par_level: item.par_level,
            low_stock_threshold: item.low_stock_threshold,
            cost_per_unit: item.cost_per_unit,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanerResponse {
    pub id: Uuid,
    pub name: String,
    pub manager_id: Uuid,
    #[schema(example = "active")]
    pub status: String,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl From<Cleaner> for CleanerResponse {
    fn from(cleaner: Cleaner) -> Self {
        Self {
            id: cleaner.id.into_uuid(),
            name: cleaner.name,
            manager_id: cleaner.manager_id.into_uuid(),
            status: cleaner.status.to_string(),
            last_active_at: cleaner.last_active_at,
        }
    }
}

/// Cleaner session state. Unauthenticated sessions carry no cleaner.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanerSessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaner: Option<CleanerResponse>,
}

impl From<CleanerSession> for CleanerSessionResponse {
    fn from(session: CleanerSession) -> Self {
        Self {
            authenticated: session.authenticated,
            cleaner: session.cleaner.map(Into::into),
        }
    }
}

/// Advisory count estimate from a photo.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountEstimateResponse {
    pub count: u32,
    /// Between 0 and 1.
    pub confidence: f64,
    pub description: String,
}

impl From<CountEstimate> for CountEstimateResponse {
    fn from(estimate: CountEstimate) -> Self {
        Self {
            count: estimate.count,
            confidence: estimate.confidence,
            description: estimate.description,
        }
    }
}
