//! Property endpoints.
//!
//! - GET /properties
//! - POST /properties
//! - DELETE /properties/:id

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use parstock_auth::Caller;
use parstock_core::PropertyId;
use parstock_inventory::CatalogService;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::models::{CreatePropertyRequest, PropertyResponse, PropertySummaryResponse};

/// List the properties the caller manages, or those of a cleaner's manager.
#[utoipa::path(
    get,
    path = "/properties",
    responses(
        (status = 200, description = "Properties", body = Vec<PropertySummaryResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Cleaner account inactive"),
    ),
    security(("bearerAuth" = [])),
    tag = "Properties"
)]
pub async fn list_properties_handler(
    Extension(caller): Extension<Caller>,
    Extension(catalog): Extension<Arc<CatalogService>>,
) -> ApiResult<Json<Vec<PropertySummaryResponse>>> {
    let properties = catalog.list_properties(&caller).await?;
    Ok(Json(
        properties.iter().map(PropertySummaryResponse::from).collect(),
    ))
}

/// Create a property with an empty catalog.
#[utoipa::path(
    post,
    path = "/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created", body = PropertyResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Owner account required"),
        (status = 422, description = "Plan property limit reached"),
    ),
    security(("bearerAuth" = [])),
    tag = "Properties"
)]
pub async fn create_property_handler(
    Extension(caller): Extension<Caller>,
    Extension(catalog): Extension<Arc<CatalogService>>,
    JsonBody(request): JsonBody<CreatePropertyRequest>,
) -> ApiResult<(StatusCode, Json<PropertyResponse>)> {
    request.validate()?;
    let property = catalog.create_property(&caller, request.into()).await?;
    Ok((StatusCode::CREATED, Json(property.into())))
}

/// Soft-delete a property. Its reports are kept and read back as orphaned.
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the property owner"),
        (status = 404, description = "Property not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Properties"
)]
pub async fn delete_property_handler(
    Extension(caller): Extension<Caller>,
    Extension(catalog): Extension<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    catalog
        .delete_property(&caller, PropertyId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
