//! Request and response models for the inventory API.

pub mod requests;
pub mod responses;

pub use requests::{
    AdjustStockRequest, CreatePropertyRequest, CreateSettingRequest, CreateWarehouseItemRequest,
    EstimateCountRequest, SubmitReportRequest, SubmittedCount, UpdateSettingRequest,
};
pub use responses::{
    CatalogResponse, CleanerResponse, CleanerSessionResponse, CountEstimateResponse,
    PropertyResponse, PropertySummaryResponse, ReportItemResponse, ReportResponse,
    RestockLineResponse, RestockPlanResponse, SettingResponse, WarehouseItemResponse,
};
