//! Inventory catalog endpoints.
//!
//! - GET /properties/:id/inventory
//! - POST /properties/:id/inventory
//! - PUT /properties/:id/inventory/:item_id
//! - DELETE /properties/:id/inventory/:item_id

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use parstock_auth::Caller;
use parstock_core::{ItemId, PropertyId};
use parstock_inventory::CatalogService;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::models::{CatalogResponse, CreateSettingRequest, SettingResponse, UpdateSettingRequest};

/// Read a property's catalog.
#[utoipa::path(
    get,
    path = "/properties/{id}/inventory",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Catalog", body = CatalogResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "No access to this property"),
        (status = 404, description = "Property not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Inventory"
)]
pub async fn get_catalog_handler(
    Extension(caller): Extension<Caller>,
    Extension(catalog): Extension<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CatalogResponse>> {
    let property = catalog
        .get_catalog(&caller, PropertyId::from_uuid(id))
        .await?;
    Ok(Json(property.into()))
}

/// Add an item to a property's catalog.
#[utoipa::path(
    post,
    path = "/properties/{id}/inventory",
    params(("id" = Uuid, Path, description = "Property ID")),
    request_body = CreateSettingRequest,
    responses(
        (status = 201, description = "Setting added", body = SettingResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the property owner"),
        (status = 404, description = "Property not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Inventory"
)]
pub async fn add_setting_handler(
    Extension(caller): Extension<Caller>,
    Extension(catalog): Extension<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
    JsonBody(request): JsonBody<CreateSettingRequest>,
) -> ApiResult<(StatusCode, Json<SettingResponse>)> {
    let setting = catalog
        .add_setting(&caller, PropertyId::from_uuid(id), request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(setting.into())))
}

/// Update an item's settings.
#[utoipa::path(
    put,
    path = "/properties/{id}/inventory/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Property ID"),
        ("item_id" = Uuid, Path, description = "Inventory item ID"),
    ),
    request_body = UpdateSettingRequest,
    responses(
        (status = 200, description = "Setting updated", body = SettingResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the property owner"),
        (status = 404, description = "Property or item not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Inventory"
)]
pub async fn update_setting_handler(
    Extension(caller): Extension<Caller>,
    Extension(catalog): Extension<Arc<CatalogService>>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    JsonBody(request): JsonBody<UpdateSettingRequest>,
) -> ApiResult<Json<SettingResponse>> {
    let setting = catalog
        .update_setting(
            &caller,
            PropertyId::from_uuid(id),
            ItemId::from_uuid(item_id),
            request.into(),
        )
        .await?;
    Ok(Json(setting.into()))
}

/// Remove an item from the catalog. Past reports keep their lines.
#[utoipa::path(
    delete,
    path = "/properties/{id}/inventory/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Property ID"),
        ("item_id" = Uuid, Path, description = "Inventory item ID"),
    ),
    responses(
        (status = 204, description = "Setting removed"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the property owner"),
        (status = 404, description = "Property or item not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Inventory"
)]
pub async fn remove_setting_handler(
    Extension(caller): Extension<Caller>,
    Extension(catalog): Extension<Arc<CatalogService>>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    catalog
        .remove_setting(&caller, PropertyId::from_uuid(id), ItemId::from_uuid(item_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
