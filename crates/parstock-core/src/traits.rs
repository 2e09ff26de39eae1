//! Ownership Traits
//!
//! Every record in parstock belongs to exactly one owner account. Types that
//! implement [`OwnerScoped`] can be checked against the caller's identity
//! before they are handed out.
//!
//! # Example
//!
//! ```
//! use parstock_core::{OwnerId, OwnerScoped};
//!
//! struct Shelf {
//!     owner_id: OwnerId,
//! }
//!
//! impl OwnerScoped for Shelf {
//!     fn owner_id(&self) -> OwnerId {
//!         self.owner_id
//!     }
//! }
//!
//! let owner = OwnerId::new();
//! let shelf = Shelf { owner_id: owner };
//! assert!(shelf.is_owned_by(owner));
//! assert!(!shelf.is_owned_by(OwnerId::new()));
//! ```

use crate::ids::OwnerId;

/// Trait for records that belong to a single owner account.
pub trait OwnerScoped {
    /// Returns the owning account.
    fn owner_id(&self) -> OwnerId;

    /// Returns true when `owner` owns this record.
    fn is_owned_by(&self, owner: OwnerId) -> bool {
        self.owner_id() == owner
    }
}
