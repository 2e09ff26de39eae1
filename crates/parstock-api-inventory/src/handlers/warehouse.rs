//! Warehouse endpoints.
//!
//! - GET /warehouse
//! - POST /warehouse
//! - POST /warehouse/:id/adjust

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use parstock_auth::Caller;
use parstock_core::WarehouseItemId;
use parstock_inventory::WarehouseService;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::models::{AdjustStockRequest, CreateWarehouseItemRequest, WarehouseItemResponse};

/// List the owner's warehouse stock.
#[utoipa::path(
    get,
    path = "/warehouse",
    responses(
        (status = 200, description = "Warehouse items", body = Vec<WarehouseItemResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Owner account required"),
    ),
    security(("bearerAuth" = [])),
    tag = "Warehouse"
)]
pub async fn list_warehouse_handler(
    Extension(caller): Extension<Caller>,
    Extension(warehouse): Extension<Arc<WarehouseService>>,
) -> ApiResult<Json<Vec<WarehouseItemResponse>>> {
    let items = warehouse.list(&caller).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Add a warehouse item.
#[utoipa::path(
    post,
    path = "/warehouse",
    request_body = CreateWarehouseItemRequest,
    responses(
        (status = 201, description = "Item created", body = WarehouseItemResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Owner account required"),
    ),
    security(("bearerAuth" = [])),
    tag = "Warehouse"
)]
pub async fn create_warehouse_item_handler(
    Extension(caller): Extension<Caller>,
    Extension(warehouse): Extension<Arc<WarehouseService>>,
    JsonBody(request): JsonBody<CreateWarehouseItemRequest>,
) -> ApiResult<(StatusCode, Json<WarehouseItemResponse>)> {
    request.validate()?;
    let item = warehouse.create(&caller, request.into()).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Move stock in or out of the warehouse.
#[utoipa::path(
    post,
    path = "/warehouse/{id}/adjust",
    params(("id" = Uuid, Path, description = "Warehouse item ID")),
    request_body = AdjustStockRequest,
    responses(
        (status = 200, description = "Item adjusted", body = WarehouseItemResponse),
        (status = 400, description = "Adjustment would go below zero"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Owner account required"),
        (status = 404, description = "Item not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Warehouse"
)]
pub async fn adjust_stock_handler(
    Extension(caller): Extension<Caller>,
    Extension(warehouse): Extension<Arc<WarehouseService>>,
    Path(id): Path<Uuid>,
    JsonBody(request): JsonBody<AdjustStockRequest>,
) -> ApiResult<Json<WarehouseItemResponse>> {
    let item = warehouse
        .adjust(&caller, WarehouseItemId::from_uuid(id), request.delta)
        .await?;
    Ok(Json(item.into()))
}
