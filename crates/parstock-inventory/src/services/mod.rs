//! Service layer for inventory management.
//!
//! Each module holds a store trait, an in-memory store for tests, and the
//! service that applies access checks and business rules on top of it.

pub mod catalog;
pub mod cleaner;
pub mod report;
pub mod warehouse;

pub use catalog::{CatalogService, InMemoryPropertyStore, NewProperty, PropertyStore};
pub use cleaner::{CleanerStore, InMemoryCleanerStore};
pub use report::{InMemoryReportStore, ReconciliationService, ReportStore, Submission};
pub use warehouse::{InMemoryWarehouseStore, NewWarehouseItem, WarehouseService, WarehouseStore};
