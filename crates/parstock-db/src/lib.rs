//! PostgreSQL persistence for parstock.
//!
//! Provides a connection pool, embedded migrations, row models and
//! implementations of the store traits from `parstock-inventory`.

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod stores;

pub use error::DbError;
pub use migrations::run_migrations;
pub use pool::DbPool;
pub use stores::{PgCleanerStore, PgPropertyStore, PgReportStore, PgWarehouseStore};
