//! Subscription plan gate.
//!
//! Billing lives elsewhere; parstock only asks how many properties an owner
//! may manage.

use async_trait::async_trait;
use parstock_core::OwnerId;

use crate::error::Result;

/// Answers plan entitlement questions for an owner.
#[async_trait]
pub trait PlanGate: Send + Sync {
    /// Maximum number of live properties, or `None` for unlimited.
    async fn max_properties(&self, owner_id: OwnerId) -> Result<Option<u32>>;
}

/// The same limit for every owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPlanGate {
    limit: Option<u32>,
}

impl StaticPlanGate {
    #[must_use]
    pub fn new(limit: Option<u32>) -> Self {
        Self { limit }
    }

    #[must_use]
    pub fn unlimited() -> Self {
        Self { limit: None }
    }
}

#[async_trait]
impl PlanGate for StaticPlanGate {
    async fn max_properties(&self, _owner_id: OwnerId) -> Result<Option<u32>> {
        Ok(self.limit)
    }
}
