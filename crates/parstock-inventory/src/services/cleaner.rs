//! Cleaner records.
//!
//! Cleaners are provisioned by the owner's account tooling; parstock only
//! reads them to decide whether a cleaner token may act.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parstock_core::CleanerId;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::types::Cleaner;

/// Trait for cleaner storage backends.
#[async_trait]
pub trait CleanerStore: Send + Sync {
    /// Get a cleaner by id.
    async fn get(&self, id: CleanerId) -> Result<Option<Cleaner>>;
}

/// In-memory cleaner store for testing.
#[derive(Debug, Default)]
pub struct InMemoryCleanerStore {
    cleaners: Arc<RwLock<HashMap<CleanerId, Cleaner>>>,
}

impl InMemoryCleanerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a cleaner.
    pub async fn insert(&self, cleaner: Cleaner) {
        self.cleaners.write().await.insert(cleaner.id, cleaner);
    }
}

#[async_trait]
impl CleanerStore for InMemoryCleanerStore {
    async fn get(&self, id: CleanerId) -> Result<Option<Cleaner>> {
        Ok(self.cleaners.read().await.get(&id).cloned())
    }
}
