//! Row models and their queries.

pub mod cleaner;
pub mod inventory_report;
pub mod property;
pub mod warehouse_item;

pub use cleaner::CleanerRow;
pub use inventory_report::InventoryReportRow;
pub use property::PropertyRow;
pub use warehouse_item::WarehouseItemRow;
