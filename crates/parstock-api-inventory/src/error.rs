//! Error types for the inventory API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parstock_assist::AssistError;
use parstock_inventory::{InventoryError, ValidationError};
use serde::Serialize;
use utoipa::ToSchema;

/// Error type for the inventory API.
#[derive(Debug, thiserror::Error)]
pub enum ApiInventoryError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Assist(#[from] AssistError),

    /// Malformed JSON or a request that failed shape checks.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Server wiring problem (missing extension, bad key).
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for ApiInventoryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiInventoryError::InvalidBody(errors.to_string())
    }
}

impl From<ValidationError> for ApiInventoryError {
    fn from(err: ValidationError) -> Self {
        ApiInventoryError::Inventory(err.into())
    }
}

/// RFC 7807 Problem Details response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Stable machine-readable error code.
    pub code: String,
}

impl ProblemDetails {
    fn new(status: StatusCode, slug: &str, code: &str, detail: Option<String>) -> Self {
        Self {
            problem_type: format!("https://parstock.app/problems/{slug}"),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail,
            code: code.to_string(),
        }
    }
}

impl ApiInventoryError {
    fn status_and_problem(&self) -> (StatusCode, ProblemDetails) {
        match self {
            ApiInventoryError::Inventory(err) => inventory_problem(err),
            ApiInventoryError::Assist(err) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    StatusCode::BAD_REQUEST,
                    "assist-error",
                    err.code(),
                    Some(err.to_string()),
                ),
            ),
            ApiInventoryError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    StatusCode::BAD_REQUEST,
                    "validation-error",
                    "invalid_body",
                    Some(msg.clone()),
                ),
            ),
            ApiInventoryError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ProblemDetails::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal-error",
                    "internal_error",
                    Some("An internal error occurred".to_string()),
                ),
            ),
        }
    }
}

fn inventory_problem(err: &InventoryError) -> (StatusCode, ProblemDetails) {
    let not_found = |code: &str| {
        (
            StatusCode::NOT_FOUND,
            ProblemDetails::new(StatusCode::NOT_FOUND, "not-found", code, Some(err.to_string())),
        )
    };

    match err {
        InventoryError::Validation(v) => (
            StatusCode::BAD_REQUEST,
            ProblemDetails::new(
                StatusCode::BAD_REQUEST,
                "validation-error",
                v.code(),
                Some(v.to_string()),
            ),
        ),
        InventoryError::PropertyNotFound(_) => not_found("property_not_found"),
        InventoryError::ItemNotFound(_) => not_found("item_not_found"),
        InventoryError::ReportNotFound(_) => not_found("report_not_found"),
        InventoryError::WarehouseItemNotFound(_) => not_found("warehouse_item_not_found"),
        InventoryError::NotFound(_) => not_found("not_found"),
        InventoryError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            ProblemDetails::new(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "unauthorized",
                Some("Authentication required".to_string()),
            ),
        ),
        InventoryError::Forbidden(reason) => (
            StatusCode::FORBIDDEN,
            ProblemDetails::new(
                StatusCode::FORBIDDEN,
                "forbidden",
                "forbidden",
                Some(format!("Access denied: {reason}")),
            ),
        ),
        InventoryError::PropertyLimitReached { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ProblemDetails::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "plan-limit",
                "property_limit_reached",
                Some(err.to_string()),
            ),
        ),
        InventoryError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ProblemDetails::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage-error",
                "storage_error",
                Some("The operation did not complete; please retry".to_string()),
            ),
        ),
    }
}

impl IntoResponse for ApiInventoryError {
    fn into_response(self) -> Response {
        let (status, problem) = self.status_and_problem();
        if status.is_server_error() {
            tracing::error!(error = %self, code = %problem.code, "Request failed");
        }
        (status, Json(problem)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiInventoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use parstock_core::PropertyId;

    fn status_of(err: ApiInventoryError) -> (StatusCode, String) {
        let (status, problem) = err.status_and_problem();
        (status, problem.code)
    }

    #[test]
    fn test_validation_maps_to_400_with_code() {
        let (status, code) = status_of(ValidationError::UnknownItem("Soap".into()).into());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "unknown_item");
    }

    #[test]
    fn test_access_errors() {
        let (status, _) = status_of(InventoryError::Unauthorized.into());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = status_of(InventoryError::Forbidden("nope".into()).into());
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_not_found_and_limit() {
        let (status, code) = status_of(InventoryError::PropertyNotFound(PropertyId::new()).into());
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "property_not_found");

        let (status, _) = status_of(InventoryError::PropertyLimitReached { limit: 3 }.into());
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_storage_hides_detail() {
        let (status, problem) =
            ApiInventoryError::from(InventoryError::storage("pool timed out")).status_and_problem();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!problem.detail.unwrap_or_default().contains("pool"));
    }

    #[test]
    fn test_assist_errors_are_400() {
        let (status, code) = status_of(AssistError::Timeout.into());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "assist_timeout");
    }

    #[test]
    fn test_problem_serializes_type_field() {
        let problem = ProblemDetails::new(StatusCode::NOT_FOUND, "not-found", "not_found", None);
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["type"], "https://parstock.app/problems/not-found");
        assert_eq!(json["title"], "Not Found");
        assert!(json.get("detail").is_none());
    }
}
