//! HTTP handlers for inventory operations.

pub mod assist;
pub mod cleaner;
pub mod inventory;
pub mod properties;
pub mod reports;
pub mod warehouse;

pub use assist::estimate_count_handler;
pub use cleaner::cleaner_session_handler;
pub use inventory::{
    add_setting_handler, get_catalog_handler, remove_setting_handler, update_setting_handler,
};
pub use properties::{create_property_handler, delete_property_handler, list_properties_handler};
pub use reports::{list_reports_handler, restock_plan_handler, submit_report_handler};
pub use warehouse::{adjust_stock_handler, create_warehouse_item_handler, list_warehouse_handler};
