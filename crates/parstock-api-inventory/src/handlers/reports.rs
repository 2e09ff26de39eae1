//! Inventory report endpoints.
//!
//! - POST /properties/:id/reports
//! - GET /properties/:id/reports
//! - GET /reports/:id/restock-plan

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use parstock_auth::Caller;
use parstock_core::{PropertyId, ReportId};
use parstock_inventory::{InventoryError, ReconciliationService};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::models::{ReportResponse, RestockPlanResponse, SubmitReportRequest};

/// Submit counted quantities and store the reconciled report.
#[utoipa::path(
    post,
    path = "/properties/{id}/reports",
    params(("id" = Uuid, Path, description = "Property ID")),
    request_body = SubmitReportRequest,
    responses(
        (status = 201, description = "Report stored", body = ReportResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "No access to this property"),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Report could not be stored"),
    ),
    security(("bearerAuth" = [])),
    tag = "Reports"
)]
pub async fn submit_report_handler(
    Extension(caller): Extension<Caller>,
    Extension(reconciliation): Extension<Arc<ReconciliationService>>,
    Path(id): Path<Uuid>,
    JsonBody(request): JsonBody<SubmitReportRequest>,
) -> ApiResult<(StatusCode, Json<ReportResponse>)> {
    caller
        .require_authenticated()
        .map_err(InventoryError::from)?;
    request.validate()?;
    let submission = request.into_submission()?;
    let report = reconciliation
        .submit(&caller, PropertyId::from_uuid(id), submission)
        .await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

/// Reports for a property, newest first.
#[utoipa::path(
    get,
    path = "/properties/{id}/reports",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Reports", body = Vec<ReportResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "No access to this property"),
        (status = 404, description = "Property not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Reports"
)]
pub async fn list_reports_handler(
    Extension(caller): Extension<Caller>,
    Extension(reconciliation): Extension<Arc<ReconciliationService>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<ReportResponse>>> {
    let records = reconciliation
        .list_reports(&caller, PropertyId::from_uuid(id))
        .await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Restock lines for a report, matched against the owner's warehouse.
#[utoipa::path(
    get,
    path = "/reports/{id}/restock-plan",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Restock plan", body = RestockPlanResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the report owner"),
        (status = 404, description = "Report not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Reports"
)]
pub async fn restock_plan_handler(
    Extension(caller): Extension<Caller>,
    Extension(reconciliation): Extension<Arc<ReconciliationService>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<RestockPlanResponse>> {
    let plan = reconciliation
        .restock_plan(&caller, ReportId::from_uuid(id))
        .await?;
    Ok(Json(plan.into()))
}
