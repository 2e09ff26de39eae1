//! Counting assist endpoint.
//!
//! - POST /assist/estimate-count

use std::sync::Arc;

use axum::{Extension, Json};
use parstock_assist::{CountingAssist, EstimateRequest};
use parstock_auth::Caller;
use parstock_inventory::AccessGate;
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::models::{CountEstimateResponse, EstimateCountRequest};

/// Estimate how many of an item a photo shows.
///
/// The estimate is advisory; the cleaner still submits the final count.
#[utoipa::path(
    post,
    path = "/assist/estimate-count",
    request_body = EstimateCountRequest,
    responses(
        (status = 200, description = "Estimate", body = CountEstimateResponse),
        (status = 400, description = "Missing input, bad image or assist failure"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearerAuth" = [])),
    tag = "Assist"
)]
pub async fn estimate_count_handler(
    Extension(caller): Extension<Caller>,
    Extension(access): Extension<AccessGate>,
    Extension(assist): Extension<Arc<dyn CountingAssist>>,
    JsonBody(request): JsonBody<EstimateCountRequest>,
) -> ApiResult<Json<CountEstimateResponse>> {
    access.resolve(&caller).await?;
    request.validate()?;

    let estimate_request = EstimateRequest::from_base64(
        &request.image_base64,
        &request.item_name,
        request.mime_type.as_deref(),
    )?;

    let estimate = assist
        .estimate_count(&estimate_request)
        .await
        .inspect_err(|e| {
            if !e.is_input_error() {
                tracing::warn!(
                    item_label = %estimate_request.item_label(),
                    error = %e,
                    "Counting assist failed"
                );
            }
        })?;

    tracing::debug!(
        item_label = %estimate_request.item_label(),
        count = estimate.count,
        confidence = estimate.confidence,
        "Counting assist estimate"
    );
    Ok(Json(estimate.into()))
}
