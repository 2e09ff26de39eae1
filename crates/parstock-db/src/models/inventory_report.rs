//! Inventory report model. Reports are written once and never updated.

use chrono::{DateTime, Utc};
use parstock_core::{CleanerId, OwnerId, PropertyId, ReportId};
use parstock_inventory::{Report, ReportItemResult};
use sqlx::types::Json;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

const COLUMNS: &str = "id, property_id, owner_id, cleaner_id, submitted_at, notes, \
                       catalog_version, items, has_shortages, has_low_stock_alerts";

/// A row of `inventory_reports`.
#[derive(Debug, Clone, FromRow)]
pub struct InventoryReportRow {
    pub id: Uuid,
    pub property_id: Uuid,
    pub owner_id: Uuid,
    pub cleaner_id: Option<Uuid>,
    pub submitted_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub catalog_version: i64,
    pub items: Json<Vec<ReportItemResult>>,
    pub has_shortages: bool,
    pub has_low_stock_alerts: bool,
}

impl From<InventoryReportRow> for Report {
    fn from(row: InventoryReportRow) -> Self {
        Report {
            id: ReportId::from_uuid(row.id),
            property_id: PropertyId::from_uuid(row.property_id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            cleaner_id: row.cleaner_id.map(CleanerId::from_uuid),
            submitted_at: row.submitted_at,
            notes: row.notes,
            catalog_version: row.catalog_version,
            items: row.items.0,
            has_shortages: row.has_shortages,
            has_low_stock_alerts: row.has_low_stock_alerts,
        }
    }
}

impl InventoryReportRow {
    /// Insert a report in a single statement.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        report: &Report,
    ) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar(&format!(
            "INSERT INTO inventory_reports ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING id"
        ))
        .bind(report.id.into_uuid())
        .bind(report.property_id.into_uuid())
        .bind(report.owner_id.into_uuid())
        .bind(report.cleaner_id.map(CleanerId::into_uuid))
        .bind(report.submitted_at)
        .bind(&report.notes)
        .bind(report.catalog_version)
        .bind(Json(&report.items))
        .bind(report.has_shortages)
        .bind(report.has_low_stock_alerts)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM inventory_reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Reports for a property, newest first.
    pub async fn list_by_property<'e>(
        executor: impl PgExecutor<'e>,
        property_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM inventory_reports \
             WHERE property_id = $1 \
             ORDER BY submitted_at DESC, id DESC"
        ))
        .bind(property_id)
        .fetch_all(executor)
        .await
    }
}
