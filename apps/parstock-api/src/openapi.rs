//! `OpenAPI` documentation and Swagger UI configuration.

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use parstock_api_inventory::models::{
    AdjustStockRequest, CatalogResponse, CleanerResponse, CleanerSessionResponse,
    CountEstimateResponse, CreatePropertyRequest, CreateSettingRequest,
    CreateWarehouseItemRequest, EstimateCountRequest, PropertyResponse, PropertySummaryResponse,
    ReportItemResponse, ReportResponse, RestockLineResponse, RestockPlanResponse,
    SettingResponse, SubmitReportRequest, SubmittedCount, UpdateSettingRequest,
    WarehouseItemResponse,
};
use parstock_api_inventory::ProblemDetails;

use crate::health::{
    DependencyCheck, HealthResponse, HealthState, LivenessResponse, ReadinessResponse,
};

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// `OpenAPI` documentation for the parstock API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "parstock API",
        version = "0.1.0",
        description = "Consumable inventory reconciliation for short-term rental properties"
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server")
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health and status"),
        (name = "Properties", description = "Property management"),
        (name = "Inventory", description = "Per-property par levels and thresholds"),
        (name = "Reports", description = "Count submissions, report history and restock plans"),
        (name = "Warehouse", description = "Owner-level stock"),
        (name = "Assist", description = "Photo-based count estimates"),
        (name = "Cleaners", description = "Cleaner session resolution")
    ),
    paths(
        crate::health::health_handler,
        crate::health::livez_handler,
        crate::health::readyz_handler,
        parstock_api_inventory::handlers::properties::list_properties_handler,
        parstock_api_inventory::handlers::properties::create_property_handler,
        parstock_api_inventory::handlers::properties::delete_property_handler,
        parstock_api_inventory::handlers::inventory::get_catalog_handler,
        parstock_api_inventory::handlers::inventory::add_setting_handler,
        parstock_api_inventory::handlers::inventory::update_setting_handler,
        parstock_api_inventory::handlers::inventory::remove_setting_handler,
        parstock_api_inventory::handlers::reports::submit_report_handler,
        parstock_api_inventory::handlers::reports::list_reports_handler,
        parstock_api_inventory::handlers::reports::restock_plan_handler,
        parstock_api_inventory::handlers::warehouse::list_warehouse_handler,
        parstock_api_inventory::handlers::warehouse::create_warehouse_item_handler,
        parstock_api_inventory::handlers::warehouse::adjust_stock_handler,
        parstock_api_inventory::handlers::assist::estimate_count_handler,
        parstock_api_inventory::handlers::cleaner::cleaner_session_handler,
    ),
    components(schemas(
        HealthState,
        DependencyCheck,
        HealthResponse,
        LivenessResponse,
        ReadinessResponse,
        ProblemDetails,
        CreatePropertyRequest,
        CreateSettingRequest,
        UpdateSettingRequest,
        SubmittedCount,
        SubmitReportRequest,
        CreateWarehouseItemRequest,
        AdjustStockRequest,
        EstimateCountRequest,
        PropertySummaryResponse,
        PropertyResponse,
        SettingResponse,
        CatalogResponse,
        ReportItemResponse,
        ReportResponse,
        RestockLineResponse,
        RestockPlanResponse,
        WarehouseItemResponse,
        CleanerResponse,
        CleanerSessionResponse,
        CountEstimateResponse,
    ))
)]
pub struct ApiDoc;

/// Swagger UI at `/docs`, document at `/api-doc/openapi.json`.
pub fn swagger_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
}
