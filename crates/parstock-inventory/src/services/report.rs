//! Report storage and the reconciliation service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parstock_auth::Caller;
use parstock_core::{PropertyId, ReportId};
use tokio::sync::RwLock;

use crate::access::{AccessGate, PropertyAction};
use crate::engine::{reconcile, CompletenessPolicy, ReportItemInput};
use crate::error::{InventoryError, Result, ValidationError};
use crate::restock::{plan_restock, RestockPlan};
use crate::services::catalog::PropertyStore;
use crate::services::warehouse::WarehouseStore;
use crate::types::{Report, ReportRecord};

const MAX_NOTES_LEN: usize = 2000;

// ============================================================================
// Store Trait
// ============================================================================

/// Append-only report storage.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a report atomically.
    async fn save(&self, report: &Report) -> Result<ReportId>;

    /// Reports for a property, newest first (by `submitted_at`, then id).
    async fn list_by_property(&self, property_id: PropertyId) -> Result<Vec<Report>>;

    /// A single report.
    async fn get(&self, id: ReportId) -> Result<Option<Report>>;
}

// ============================================================================
// In-Memory Store (for testing)
// ============================================================================

/// In-memory report store for testing.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: Arc<RwLock<HashMap<ReportId, Report>>>,
}

impl InMemoryReportStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports.
    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, report: &Report) -> Result<ReportId> {
        let mut reports = self.reports.write().await;
        if reports.contains_key(&report.id) {
            return Err(InventoryError::Storage(format!(
                "report {} already exists",
                report.id
            )));
        }
        reports.insert(report.id, report.clone());
        Ok(report.id)
    }

    async fn list_by_property(&self, property_id: PropertyId) -> Result<Vec<Report>> {
        let reports = self.reports.read().await;
        let mut results: Vec<_> = reports
            .values()
            .filter(|r| r.property_id == property_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(results)
    }

    async fn get(&self, id: ReportId) -> Result<Option<Report>> {
        Ok(self.reports.read().await.get(&id).cloned())
    }
}

// ============================================================================
// Service
// ============================================================================

/// A cleaner's (or owner's) submission before validation against the catalog.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub items: Vec<ReportItemInput>,
    pub notes: Option<String>,
}

/// Orchestrates submissions: access check, catalog snapshot, reconcile, save.
pub struct ReconciliationService {
    properties: Arc<dyn PropertyStore>,
    reports: Arc<dyn ReportStore>,
    warehouse: Arc<dyn WarehouseStore>,
    access: AccessGate,
    policy: CompletenessPolicy,
}

impl ReconciliationService {
    pub fn new(
        properties: Arc<dyn PropertyStore>,
        reports: Arc<dyn ReportStore>,
        warehouse: Arc<dyn WarehouseStore>,
        access: AccessGate,
    ) -> Self {
        Self {
            properties,
            reports,
            warehouse,
            access,
            policy: CompletenessPolicy::default(),
        }
    }

    /// Set how uncounted catalog items are handled.
    #[must_use]
    pub fn with_policy(mut self, policy: CompletenessPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> CompletenessPolicy {
        self.policy
    }

    /// Reconcile and persist a submission.
    ///
    /// The report is returned only once it has been saved. Validation
    /// failures never reach the store.
    pub async fn submit(
        &self,
        caller: &Caller,
        property_id: PropertyId,
        submission: Submission,
    ) -> Result<Report> {
        let property = self
            .properties
            .get(property_id)
            .await?
            .filter(|p| !p.is_deleted())
            .ok_or(InventoryError::PropertyNotFound(property_id))?;
        let actor = self
            .access
            .authorize(caller, &property, PropertyAction::SubmitReport)
            .await?;

        let notes = normalize_notes(submission.notes)?;
        let snapshot = property.snapshot();
        let reconciliation = reconcile(&snapshot, &submission.items, self.policy)?;

        let report = Report {
            id: ReportId::new(),
            property_id,
            owner_id: snapshot.owner_id,
            cleaner_id: actor.cleaner_id(),
            submitted_at: Utc::now(),
            notes,
            catalog_version: reconciliation.catalog_version,
            items: reconciliation.items,
            has_shortages: reconciliation.has_shortages,
            has_low_stock_alerts: reconciliation.has_low_stock_alerts,
        };

        if let Err(e) = self.reports.save(&report).await {
            tracing::error!(
                operation = "save_report",
                property_id = %property_id,
                error = %e,
                "Report was not saved"
            );
            return Err(match e {
                InventoryError::Storage(_) => e,
                other => InventoryError::storage(other),
            });
        }

        tracing::info!(
            report_id = %report.id,
            property_id = %property_id,
            catalog_version = report.catalog_version,
            has_shortages = report.has_shortages,
            has_low_stock_alerts = report.has_low_stock_alerts,
            "Report submitted"
        );
        Ok(report)
    }

    /// Reports for a property, newest first, flagged when the property is gone.
    pub async fn list_reports(
        &self,
        caller: &Caller,
        property_id: PropertyId,
    ) -> Result<Vec<ReportRecord>> {
        let property = self
            .properties
            .get(property_id)
            .await?
            .ok_or(InventoryError::PropertyNotFound(property_id))?;
        self.access
            .authorize(caller, &property, PropertyAction::Manage)
            .await?;

        let orphaned = property.is_deleted();
        Ok(self
            .reports
            .list_by_property(property_id)
            .await?
            .into_iter()
            .map(|report| ReportRecord { report, orphaned })
            .collect())
    }

    /// Restock plan for a stored report against the owner's warehouse.
    ///
    /// Quantities come from the report. Unit costs come from the property's
    /// current catalog, so a price edited after submission is priced at the
    /// new value and a deleted property yields no costs.
    pub async fn restock_plan(&self, caller: &Caller, report_id: ReportId) -> Result<RestockPlan> {
        let report = self
            .reports
            .get(report_id)
            .await?
            .ok_or(InventoryError::ReportNotFound(report_id))?;
        self.access
            .authorize(caller, &report, PropertyAction::Manage)
            .await?;

        let catalog = self
            .properties
            .get(report.property_id)
            .await?
            .filter(|p| !p.is_deleted())
            .map(|p| p.settings)
            .unwrap_or_default();
        let warehouse = self.warehouse.list_by_owner(report.owner_id).await?;

        Ok(plan_restock(&report, &catalog, &warehouse))
    }
}

fn normalize_notes(notes: Option<String>) -> Result<Option<String>> {
    let Some(notes) = notes else {
        return Ok(None);
    };
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::InvalidField {
            field: "notes".to_string(),
            message: format!("must be at most {MAX_NOTES_LEN} characters"),
        }
        .into());
    }
    Ok(Some(trimmed.to_string()))
}
