//! Access gate: who may touch which property.
//!
//! Owners reach their own records. Cleaners reach the properties of the owner
//! that manages them, may read catalogs and submit counts there, and only
//! while their account is active. Guests reach nothing.

use std::sync::Arc;

use parstock_auth::Caller;
use parstock_core::{CleanerId, OwnerId, OwnerScoped};
use serde::Serialize;

use crate::error::{InventoryError, Result};
use crate::services::cleaner::CleanerStore;
use crate::types::Cleaner;

/// What a caller wants to do with a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyAction {
    /// Read the catalog.
    ReadCatalog,
    /// Submit counts.
    SubmitReport,
    /// Read reports or change the property and its catalog.
    Manage,
}

impl PropertyAction {
    fn allowed_for_cleaner(self) -> bool {
        matches!(self, Self::ReadCatalog | Self::SubmitReport)
    }
}

/// A caller that has passed identity checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Owner(OwnerId),
    Cleaner(Cleaner),
}

impl Actor {
    /// The owner account whose records this actor works on.
    #[must_use]
    pub fn acting_owner(&self) -> OwnerId {
        match self {
            Actor::Owner(owner_id) => *owner_id,
            Actor::Cleaner(cleaner) => cleaner.manager_id,
        }
    }

    #[must_use]
    pub fn cleaner_id(&self) -> Option<CleanerId> {
        match self {
            Actor::Owner(_) => None,
            Actor::Cleaner(cleaner) => Some(cleaner.id),
        }
    }
}

/// Result of resolving a cleaner session. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanerSession {
    pub authenticated: bool,
    pub cleaner: Option<Cleaner>,
}

impl CleanerSession {
    fn anonymous() -> Self {
        Self {
            authenticated: false,
            cleaner: None,
        }
    }
}

/// Resolves callers and checks them against records.
#[derive(Clone)]
pub struct AccessGate {
    cleaners: Arc<dyn CleanerStore>,
}

impl AccessGate {
    pub fn new(cleaners: Arc<dyn CleanerStore>) -> Self {
        Self { cleaners }
    }

    /// Resolve a caller into an actor.
    ///
    /// Guests are `Unauthorized`. A cleaner token whose cleaner is unknown or
    /// inactive is `Forbidden`.
    pub async fn resolve(&self, caller: &Caller) -> Result<Actor> {
        match caller {
            Caller::Guest => Err(InventoryError::Unauthorized),
            Caller::Owner(owner_id) => Ok(Actor::Owner(*owner_id)),
            Caller::Cleaner(cleaner_id) => match self.cleaners.get(*cleaner_id).await? {
                Some(cleaner) if cleaner.is_active() => Ok(Actor::Cleaner(cleaner)),
                Some(_) => {
                    tracing::info!(cleaner_id = %cleaner_id, "Inactive cleaner rejected");
                    Err(InventoryError::Forbidden(
                        "cleaner account is not active".to_string(),
                    ))
                }
                None => Err(InventoryError::Forbidden(
                    "cleaner account not found".to_string(),
                )),
            },
        }
    }

    /// Require an owner caller.
    pub fn require_owner(&self, caller: &Caller) -> Result<OwnerId> {
        match caller {
            Caller::Cleaner(_) => Err(InventoryError::Forbidden(
                "owner account required".to_string(),
            )),
            _ => Ok(caller.require_owner()?),
        }
    }

    /// Check `caller` may perform `action` on `record`.
    pub async fn authorize<T: OwnerScoped + Sync>(
        &self,
        caller: &Caller,
        record: &T,
        action: PropertyAction,
    ) -> Result<Actor> {
        let actor = self.resolve(caller).await?;
        if let Actor::Cleaner(ref cleaner) = actor {
            if !action.allowed_for_cleaner() {
                return Err(InventoryError::Forbidden(
                    "cleaners cannot perform this action".to_string(),
                ));
            }
            if !record.is_owned_by(cleaner.manager_id) {
                return Err(InventoryError::Forbidden(
                    "property is managed by another owner".to_string(),
                ));
            }
            return Ok(actor);
        }
        caller.ensure_owns(record)?;
        Ok(actor)
    }

    /// Resolve the cleaner behind a caller without ever failing.
    pub async fn cleaner_session(&self, caller: &Caller) -> CleanerSession {
        let Caller::Cleaner(cleaner_id) = caller else {
            return CleanerSession::anonymous();
        };
        match self.cleaners.get(*cleaner_id).await {
            Ok(Some(cleaner)) if cleaner.is_active() => CleanerSession {
                authenticated: true,
                cleaner: Some(cleaner),
            },
            Ok(_) => CleanerSession::anonymous(),
            Err(e) => {
                tracing::warn!(cleaner_id = %cleaner_id, error = %e, "Cleaner lookup failed");
                CleanerSession::anonymous()
            }
        }
    }
}
