//! Error Types
//!
//! Standardized error types shared by parstock crates.
//!
//! # Example
//!
//! ```
//! use parstock_core::{ParstockError, Result};
//!
//! fn find_property(id: &str) -> Result<String> {
//!     if id.is_empty() {
//!         return Err(ParstockError::NotFound {
//!             resource: "Property".to_string(),
//!             id: None,
//!         });
//!     }
//!     Ok(format!("Property {}", id))
//! }
//! ```

use crate::ids::OwnerId;
use serde::Serialize;
use thiserror::Error;

/// Standardized error type for parstock.
///
/// # Variants
///
/// - `Unauthorized` - Missing or invalid caller identity (HTTP 401)
/// - `NotFound` - Resource not found (HTTP 404)
/// - `OwnerMismatch` - Record belongs to a different owner (HTTP 403)
/// - `ValidationError` - Input validation failure (HTTP 400)
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParstockError {
    /// The caller could not be identified.
    #[error("Unauthorized{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Unauthorized {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Requested resource was not found.
    #[error("{resource} not found{}", id.as_ref().map(|i| format!(": {i}")).unwrap_or_default())]
    NotFound {
        /// The type of resource that was not found (e.g., "Property", "Report")
        resource: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// A record was accessed by an account that does not own it.
    #[error("Owner mismatch: expected {expected}, got {actual}")]
    OwnerMismatch { expected: OwnerId, actual: OwnerId },

    /// Input validation failure.
    #[error("Validation error on field '{field}': {message}")]
    ValidationError { field: String, message: String },
}

/// Type alias for Results using `ParstockError`.
pub type Result<T> = std::result::Result<T, ParstockError>;
