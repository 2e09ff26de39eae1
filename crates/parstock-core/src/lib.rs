//! parstock Core Library
//!
//! Shared types and traits for parstock.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (OwnerId, PropertyId, ReportId, ...)
//! - [`traits`] - Ownership traits (OwnerScoped)
//! - [`error`] - Standardized error types (ParstockError)
//!
//! # Example
//!
//! ```
//! use parstock_core::{OwnerId, PropertyId, ParstockError, Result};
//!
//! let owner_id = OwnerId::new();
//! let property_id = PropertyId::new();
//!
//! fn example() -> Result<()> {
//!     Err(ParstockError::Unauthorized { message: None })
//! }
//! ```

pub mod error;
pub mod ids;
pub mod traits;

pub use error::{ParstockError, Result};
pub use ids::{CleanerId, ItemId, OwnerId, ParseIdError, PropertyId, ReportId, WarehouseItemId};
pub use traits::OwnerScoped;
