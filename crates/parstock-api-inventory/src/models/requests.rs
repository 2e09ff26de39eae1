//! Request models for the inventory API.

use parstock_inventory::{
    NewProperty, NewSetting, NewWarehouseItem, ReportItemInput, SettingPatch, Submission,
    ValidationError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a property.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

impl From<CreatePropertyRequest> for NewProperty {
    fn from(request: CreatePropertyRequest) -> Self {
        NewProperty {
            name: request.name,
            address: request.address,
        }
    }
}

/// Request to add an inventory setting to a property.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSettingRequest {
    pub item_name: String,
    pub par_level: i32,
    pub low_stock_threshold: i32,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2.50")]
    pub unit_cost: Option<Decimal>,
}

impl From<CreateSettingRequest> for NewSetting {
    fn from(request: CreateSettingRequest) -> Self {
        NewSetting {
            item_name: request.item_name,
            par_level: request.par_level,
            low_stock_threshold: request.low_stock_threshold,
            unit_cost: request.unit_cost,
        }
    }
}

/// Partial update of an inventory setting. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingRequest {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub par_level: Option<i32>,
    #[serde(default)]
    pub low_stock_threshold: Option<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub unit_cost: Option<Decimal>,
}

impl From<UpdateSettingRequest> for SettingPatch {
    fn from(request: UpdateSettingRequest) -> Self {
        SettingPatch {
            item_name: request.item_name,
            par_level: request.par_level,
            low_stock_threshold: request.low_stock_threshold,
            unit_cost: request.unit_cost,
        }
    }
}

/// One counted item in a submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedCount {
    pub item_name: String,
    /// Whole number of units counted. Integral floats such as `4.0` are accepted.
    #[schema(value_type = i64, example = 4)]
    pub counted_quantity: serde_json::Number,
}

/// Request to submit an inventory report.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    #[validate(length(max = 500))]
    pub items: Vec<SubmittedCount>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SubmitReportRequest {
    /// Check every count and build the typed submission.
    pub fn into_submission(self) -> Result<Submission, ValidationError> {
        let items = self
            .items
            .into_iter()
            .map(|item| ReportItemInput::from_json_number(item.item_name, &item.counted_quantity))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Submission {
            items,
            notes: self.notes,
        })
    }
}

/// Request to add a warehouse item.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehouseItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub sku: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    pub par_level: i32,
    pub low_stock_threshold: i32,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub cost_per_unit: Option<Decimal>,
}

impl From<CreateWarehouseItemRequest> for NewWarehouseItem {
    fn from(request: CreateWarehouseItemRequest) -> Self {
        NewWarehouseItem {
            name: request.name,
            sku: request.sku,
            quantity: request.quantity,
            par_level: request.par_level,
            low_stock_threshold: request.low_stock_threshold,
            cost_per_unit: request.cost_per_unit,
        }
    }
}

/// Request to move warehouse stock up or down.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockRequest {
    /// Units to add (positive) or remove (negative).
    pub delta: i32,
}

/// Request to estimate a count from a photo.
///
/// Missing fields default to empty so the assist adapter reports which
/// input is absent.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateCountRequest {
    /// Base64 image, optionally as a `data:` URL.
    #[serde(default)]
    pub image_base64: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub item_name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}
