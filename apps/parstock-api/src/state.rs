//! Application state shared by the operational endpoints.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parstock_db::DbPool;

use crate::metrics::MetricsRegistry;

/// State for health, readiness and metrics handlers.
///
/// Inventory routes carry their own services as extensions; this struct only
/// holds what the operational endpoints need.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub db_max_connections: u32,
    pub metrics: Arc<MetricsRegistry>,
    pub startup_time: Arc<Instant>,
    /// Application version from Cargo.toml.
    pub version: &'static str,
    /// Set once a shutdown signal arrives; readiness reports 503 from then on.
    pub shutting_down: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(db: DbPool, db_max_connections: u32, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            db,
            db_max_connections,
            metrics,
            startup_time: Arc::new(Instant::now()),
            version: env!("CARGO_PKG_VERSION"),
            shutting_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.startup_time.elapsed().as_secs()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    pub fn mark_shutting_down(&self) {
        self.shutting_down.store(true, Ordering::Release);
    }
}
