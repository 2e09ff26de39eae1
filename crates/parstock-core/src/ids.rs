//! Strongly Typed Identifiers
//!
//! Newtype wrappers around UUIDs so that a property id can never be passed
//! where an owner id is expected.
//!
//! # Example
//!
//! ```
//! use parstock_core::{OwnerId, PropertyId};
//!
//! let owner = OwnerId::new();
//! let property = PropertyId::new();
//!
//! fn requires_owner(id: OwnerId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_owner(owner);
//! // requires_owner(property); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying UUID parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Consumes the ID and returns the underlying UUID.
            #[must_use]
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Identifier of an owner account (a property manager).
    ///
    /// Owners hold properties, warehouse stock and the cleaners they manage.
    OwnerId
);

define_id!(
    /// Identifier of a rental property.
    PropertyId
);

define_id!(
    /// Identifier of a cleaner account, managed by exactly one owner.
    CleanerId
);

define_id!(
    /// Identifier of a persisted reconciliation report.
    ReportId
);

define_id!(
    /// Identifier of a tracked item within a property's inventory catalog.
    ItemId
);

define_id!(
    /// Identifier of a warehouse (bulk stock) record.
    WarehouseItemId
);
