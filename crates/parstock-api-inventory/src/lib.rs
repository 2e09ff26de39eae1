//! HTTP surface for parstock inventory operations.
//!
//! Axum handlers, request/response models and RFC 7807 error mapping for
//! properties, catalogs, reports, the warehouse, the counting assist and
//! cleaner sessions. Wire format is camelCase JSON.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;

pub use error::{ApiInventoryError, ApiResult, ProblemDetails};
pub use middleware::JwtVerifier;
pub use router::{inventory_router, InventoryState};
