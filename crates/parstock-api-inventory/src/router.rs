//! Inventory API router configuration.
//!
//! Configures routes for inventory endpoints:
//! - GET /properties, POST /properties, DELETE /properties/:id
//! - GET|POST /properties/:id/inventory
//! - PUT|DELETE /properties/:id/inventory/:item_id
//! - GET|POST /properties/:id/reports
//! - GET /reports/:id/restock-plan
//! - GET|POST /warehouse, POST /warehouse/:id/adjust
//! - POST /assist/estimate-count
//! - GET /cleaner/session

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Extension, Router,
};
use parstock_assist::CountingAssist;
use parstock_inventory::{AccessGate, CatalogService, ReconciliationService, WarehouseService};

use crate::handlers::{
    add_setting_handler, adjust_stock_handler, cleaner_session_handler, create_property_handler,
    create_warehouse_item_handler, delete_property_handler, estimate_count_handler,
    get_catalog_handler, list_properties_handler, list_reports_handler, list_warehouse_handler,
    remove_setting_handler, restock_plan_handler, submit_report_handler, update_setting_handler,
};
use crate::middleware::{caller_auth_middleware, JwtVerifier};

/// Application state for inventory routes.
#[derive(Clone)]
pub struct InventoryState {
    pub catalog: Arc<CatalogService>,
    pub reconciliation: Arc<ReconciliationService>,
    pub warehouse: Arc<WarehouseService>,
    pub access: AccessGate,
    pub assist: Arc<dyn CountingAssist>,
    pub verifier: JwtVerifier,
}

/// Create the inventory router with all endpoints.
///
/// Every route runs behind [`caller_auth_middleware`], which resolves the
/// caller from the Bearer token (or as a guest) before the handler runs.
pub fn inventory_router(state: InventoryState) -> Router {
    Router::new()
        .route(
            "/properties",
            get(list_properties_handler).post(create_property_handler),
        )
        .route("/properties/:id", delete(delete_property_handler))
        .route(
            "/properties/:id/inventory",
            get(get_catalog_handler).post(add_setting_handler),
        )
        .route(
            "/properties/:id/inventory/:item_id",
            put(update_setting_handler).delete(remove_setting_handler),
        )
        .route(
            "/properties/:id/reports",
            get(list_reports_handler).post(submit_report_handler),
        )
        .route("/reports/:id/restock-plan", get(restock_plan_handler))
        .route(
            "/warehouse",
            get(list_warehouse_handler).post(create_warehouse_item_handler),
        )
        .route("/warehouse/:id/adjust", post(adjust_stock_handler))
        .route("/assist/estimate-count", post(estimate_count_handler))
        .route("/cleaner/session", get(cleaner_session_handler))
        .layer(middleware::from_fn(caller_auth_middleware))
        .layer(Extension(state.catalog))
        .layer(Extension(state.reconciliation))
        .layer(Extension(state.warehouse))
        .layer(Extension(state.access))
        .layer(Extension(state.assist))
        .layer(Extension(state.verifier))
}
