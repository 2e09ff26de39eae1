//! Test helpers: the inventory router over in-memory stores.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use parstock_api_inventory::{inventory_router, InventoryState, JwtVerifier};
use parstock_assist::{AssistError, CountEstimate, CountingAssist, EstimateRequest};
use parstock_auth::{encode_token, JwtClaims, Role, ValidationConfig};
use parstock_core::{CleanerId, OwnerId};
use parstock_inventory::{
    AccessGate, CatalogService, Cleaner, CleanerStatus, InMemoryCleanerStore,
    InMemoryPropertyStore, InMemoryReportStore, InMemoryWarehouseStore, ReconciliationService,
    StaticPlanGate, WarehouseService,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const PRIVATE_KEY: &[u8] = include_bytes!("../../../parstock-auth/test-keys/private.pem");
pub const PUBLIC_KEY: &[u8] = include_bytes!("../../../parstock-auth/test-keys/public.pem");
pub const ISSUER: &str = "parstock-test";

/// Assist double that always sees seven of whatever it is asked about.
pub struct FixedAssist;

#[async_trait]
impl CountingAssist for FixedAssist {
    async fn estimate_count(
        &self,
        request: &EstimateRequest,
    ) -> Result<CountEstimate, AssistError> {
        Ok(CountEstimate {
            count: 7,
            confidence: 0.9,
            description: format!("7 {} on the shelf", request.item_label()),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub cleaners: Arc<InMemoryCleanerStore>,
    pub reports: Arc<InMemoryReportStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(None, Arc::new(FixedAssist))
    }

    pub fn with_plan_limit(limit: u32) -> Self {
        Self::build(Some(limit), Arc::new(FixedAssist))
    }

    pub fn with_assist(assist: Arc<dyn CountingAssist>) -> Self {
        Self::build(None, assist)
    }

    fn build(limit: Option<u32>, assist: Arc<dyn CountingAssist>) -> Self {
        let properties = Arc::new(InMemoryPropertyStore::new());
        let reports = Arc::new(InMemoryReportStore::new());
        let warehouse = Arc::new(InMemoryWarehouseStore::new());
        let cleaners = Arc::new(InMemoryCleanerStore::new());
        let access = AccessGate::new(cleaners.clone());

        let state = InventoryState {
            catalog: Arc::new(CatalogService::new(
                properties.clone(),
                Arc::new(StaticPlanGate::new(limit)),
                access.clone(),
            )),
            reconciliation: Arc::new(ReconciliationService::new(
                properties,
                reports.clone(),
                warehouse.clone(),
                access.clone(),
            )),
            warehouse: Arc::new(WarehouseService::new(warehouse, access.clone())),
            access,
            assist,
            verifier: JwtVerifier::new(PUBLIC_KEY, ValidationConfig::default().issuer(ISSUER)),
        };

        Self {
            router: inventory_router(state),
            cleaners,
            reports,
        }
    }

    /// Register a cleaner working for `manager`.
    pub async fn add_cleaner(&self, manager: Uuid, status: CleanerStatus) -> Uuid {
        let id = Uuid::new_v4();
        self.cleaners
            .insert(Cleaner {
                id: CleanerId::from_uuid(id),
                name: "Sam".to_string(),
                manager_id: OwnerId::from_uuid(manager),
                status,
                last_active_at: None,
            })
            .await;
        id
    }

    /// Send a request and return the status with the decoded JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Create a property with towels (par 10, low 3) and soap (par 6, low 2).
    pub async fn seed_property(&self, owner_token: &str) -> String {
        let (status, property) = self
            .send(
                Method::POST,
                "/properties",
                Some(owner_token),
                Some(serde_json::json!({"name": "Beach House", "address": "1 Shore Rd"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = property["id"].as_str().unwrap().to_string();

        for (name, par, low) in [("Towels", 10, 3), ("Soap", 6, 2)] {
            let (status, _) = self
                .send(
                    Method::POST,
                    &format!("/properties/{id}/inventory"),
                    Some(owner_token),
                    Some(serde_json::json!({
                        "itemName": name,
                        "parLevel": par,
                        "lowStockThreshold": low,
                        "unitCost": "1.50"
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        id
    }
}

fn token(subject: Uuid, role: Role) -> String {
    let claims = JwtClaims::builder()
        .subject(subject.to_string())
        .issuer(ISSUER)
        .role(role)
        .expires_in_secs(600)
        .build();
    encode_token(&claims, PRIVATE_KEY).unwrap()
}

pub fn owner_token(owner: Uuid) -> String {
    token(owner, Role::Owner)
}

pub fn cleaner_token(cleaner: Uuid) -> String {
    token(cleaner, Role::Cleaner)
}
