//! Cleaner session endpoint.
//!
//! - GET /cleaner/session

use axum::{Extension, Json};
use parstock_auth::Caller;
use parstock_inventory::AccessGate;

use crate::models::CleanerSessionResponse;

/// Resolve the current cleaner session. Never fails.
#[utoipa::path(
    get,
    path = "/cleaner/session",
    responses(
        (status = 200, description = "Session state", body = CleanerSessionResponse),
    ),
    security((), ("bearerAuth" = [])),
    tag = "Cleaners"
)]
pub async fn cleaner_session_handler(
    Extension(caller): Extension<Caller>,
    Extension(access): Extension<AccessGate>,
) -> Json<CleanerSessionResponse> {
    Json(access.cleaner_session(&caller).await.into())
}
