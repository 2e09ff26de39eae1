//! Router-level tests for the inventory API over in-memory stores.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{cleaner_token, owner_token, TestApp};
use parstock_assist::UnavailableCountingAssist;
use parstock_inventory::CleanerStatus;
use serde_json::json;
use uuid::Uuid;

fn counts(items: &[(&str, serde_json::Value)]) -> serde_json::Value {
    json!({
        "items": items
            .iter()
            .map(|(name, count)| json!({"itemName": name, "countedQuantity": count}))
            .collect::<Vec<_>>()
    })
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn test_owner_submits_report() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (status, report) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&owner),
            Some(counts(&[("towels", json!(2)), ("Soap", json!(4))])),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["hasShortages"], true);
    assert_eq!(report["hasLowStockAlerts"], true);
    assert_eq!(report["items"][0]["itemName"], "Towels");
    assert_eq!(report["items"][0]["status"], "shortage");
    assert_eq!(report["items"][0]["shortageAmount"], 8);
    assert_eq!(report["items"][1]["status"], "low");
    assert_eq!(report["items"][1]["shortageAmount"], 2);
    assert_eq!(report["orphaned"], false);
    assert!(report["reportId"].is_string());
    assert_eq!(app.reports.len().await, 1);
}

#[tokio::test]
async fn test_full_counts_raise_no_flags() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (status, report) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&owner),
            Some(counts(&[("Towels", json!(10.0)), ("Soap", json!(6))])),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["hasShortages"], false);
    assert_eq!(report["hasLowStockAlerts"], false);
    assert_eq!(report["items"][0]["status"], "ok");
}

#[tokio::test]
async fn test_unknown_item_rejected_and_not_stored() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (status, problem) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&owner),
            Some(counts(&[("Towels", json!(2)), ("Mop", json!(1))])),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "unknown_item");
    assert_eq!(problem["status"], 400);
    assert!(app.reports.is_empty().await);
}

#[tokio::test]
async fn test_fractional_count_rejected() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (status, problem) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&owner),
            Some(counts(&[("Towels", json!(2.5))])),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "invalid_quantity");
}

#[tokio::test]
async fn test_malformed_body_is_problem_json() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (status, problem) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&owner),
            Some(json!({"items": "lots"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "invalid_body");
}

#[tokio::test]
async fn test_submit_to_missing_property_is_404() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());

    let (status, problem) = app
        .send(
            Method::POST,
            &format!("/properties/{}/reports", Uuid::new_v4()),
            Some(&owner),
            Some(counts(&[("Towels", json!(1))])),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["code"], "property_not_found");
}

// ============================================================================
// Access
// ============================================================================

#[tokio::test]
async fn test_guest_is_unauthorized() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            None,
            Some(counts(&[("Towels", json!(2))])),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::GET, "/properties", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_guest_with_invalid_counts_is_unauthorized() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (status, problem) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            None,
            Some(counts(&[("Towels", json!(2.5))])),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(problem["status"], 401);
}

#[tokio::test]
async fn test_other_owner_is_forbidden_not_404() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let intruder = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (status, problem) = app
        .send(
            Method::GET,
            &format!("/properties/{property}/inventory"),
            Some(&intruder),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(problem["code"], "forbidden");

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&intruder),
            Some(counts(&[("Towels", json!(2))])),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_active_cleaner_counts_for_manager() {
    let app = TestApp::new();
    let manager = Uuid::new_v4();
    let owner = owner_token(manager);
    let property = app.seed_property(&owner).await;
    let cleaner_id = app.add_cleaner(manager, CleanerStatus::Active).await;
    let cleaner = cleaner_token(cleaner_id);

    let (status, listed) = app
        .send(Method::GET, "/properties", Some(&cleaner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["itemCount"], 2);

    let (status, report) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&cleaner),
            Some(counts(&[("Towels", json!(9)), ("Soap", json!(6))])),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["cleanerId"], cleaner_id.to_string());

    // Report history and catalog edits stay with the owner.
    let (status, _) = app
        .send(
            Method::GET,
            &format!("/properties/{property}/reports"),
            Some(&cleaner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/properties/{property}"),
            Some(&cleaner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_inactive_cleaner_rejected() {
    let app = TestApp::new();
    let manager = Uuid::new_v4();
    let property = app.seed_property(&owner_token(manager)).await;
    let cleaner = cleaner_token(app.add_cleaner(manager, CleanerStatus::Inactive).await);

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&cleaner),
            Some(counts(&[("Towels", json!(9))])),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, session) = app
        .send(Method::GET, "/cleaner/session", Some(&cleaner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session, json!({"authenticated": false}));
}

#[tokio::test]
async fn test_cleaner_session_resolution() {
    let app = TestApp::new();
    let manager = Uuid::new_v4();
    let cleaner_id = app.add_cleaner(manager, CleanerStatus::Active).await;

    let (status, session) = app
        .send(
            Method::GET,
            "/cleaner/session",
            Some(&cleaner_token(cleaner_id)),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["authenticated"], true);
    assert_eq!(session["cleaner"]["managerId"], manager.to_string());
    assert_eq!(session["cleaner"]["status"], "active");

    for token in [None, Some("garbage"), Some(owner_token(manager).as_str())] {
        let (status, session) = app.send(Method::GET, "/cleaner/session", token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["authenticated"], false);
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_threshold_above_par_rejected_without_change() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (_, before) = app
        .send(
            Method::GET,
            &format!("/properties/{property}/inventory"),
            Some(&owner),
            None,
        )
        .await;
    let item_id = before["settings"][0]["id"].as_str().unwrap().to_string();

    let (status, problem) = app
        .send(
            Method::PUT,
            &format!("/properties/{property}/inventory/{item_id}"),
            Some(&owner),
            Some(json!({"lowStockThreshold": 11})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "threshold_exceeds_par_level");

    let (_, after) = app
        .send(
            Method::GET,
            &format!("/properties/{property}/inventory"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_catalog_edits_bump_version() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (_, catalog) = app
        .send(
            Method::GET,
            &format!("/properties/{property}/inventory"),
            Some(&owner),
            None,
        )
        .await;
    let version = catalog["catalogVersion"].as_i64().unwrap();
    let soap = catalog["settings"][1]["id"].as_str().unwrap().to_string();

    let (status, setting) = app
        .send(
            Method::PUT,
            &format!("/properties/{property}/inventory/{soap}"),
            Some(&owner),
            Some(json!({"parLevel": 8})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(setting["parLevel"], 8);
    assert_eq!(setting["lowStockThreshold"], 2);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/properties/{property}/inventory/{soap}"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, catalog) = app
        .send(
            Method::GET,
            &format!("/properties/{property}/inventory"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(catalog["catalogVersion"].as_i64().unwrap(), version + 2);
    assert_eq!(catalog["settings"].as_array().unwrap().len(), 1);

    let (status, problem) = app
        .send(
            Method::DELETE,
            &format!("/properties/{property}/inventory/{soap}"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["code"], "item_not_found");
}

#[tokio::test]
async fn test_duplicate_item_name_rejected() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    let (status, problem) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/inventory"),
            Some(&owner),
            Some(json!({"itemName": " TOWELS ", "parLevel": 4, "lowStockThreshold": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "duplicate_item_in_catalog");
}

#[tokio::test]
async fn test_plan_limit_is_422() {
    let app = TestApp::with_plan_limit(1);
    let owner = owner_token(Uuid::new_v4());
    app.seed_property(&owner).await;

    let (status, problem) = app
        .send(
            Method::POST,
            "/properties",
            Some(&owner),
            Some(json!({"name": "Cabin"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(problem["code"], "property_limit_reached");
}

#[tokio::test]
async fn test_deleted_property_reports_are_orphaned() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    for count in [1, 9] {
        let (status, _) = app
            .send(
                Method::POST,
                &format!("/properties/{property}/reports"),
                Some(&owner),
                Some(counts(&[("Towels", json!(count))])),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/properties/{property}"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, reports) = app
        .send(
            Method::GET,
            &format!("/properties/{property}/reports"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r["orphaned"] == true));

    let (_, listed) = app
        .send(Method::GET, "/properties", Some(&owner), None)
        .await;
    assert_eq!(listed, json!([]));

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&owner),
            Some(counts(&[("Towels", json!(3))])),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Warehouse and restock
// ============================================================================

#[tokio::test]
async fn test_warehouse_adjust_and_low_stock() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());

    let (status, item) = app
        .send(
            Method::POST,
            "/warehouse",
            Some(&owner),
            Some(json!({"name": "Towels", "quantity": 6, "parLevel": 20, "lowStockThreshold": 5})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["isLowStock"], false);
    let id = item["id"].as_str().unwrap().to_string();

    let (status, item) = app
        .send(
            Method::POST,
            &format!("/warehouse/{id}/adjust"),
            Some(&owner),
            Some(json!({"delta": -1})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["quantity"], 5);
    assert_eq!(item["isLowStock"], true);

    let (status, problem) = app
        .send(
            Method::POST,
            &format!("/warehouse/{id}/adjust"),
            Some(&owner),
            Some(json!({"delta": -6})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "stock_out_of_range");

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/warehouse/{}/adjust", Uuid::new_v4()),
            Some(&owner),
            Some(json!({"delta": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = app.send(Method::GET, "/warehouse", Some(&owner), None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["isLowStock"], true);
}

#[tokio::test]
async fn test_restock_plan_matches_warehouse() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());
    let property = app.seed_property(&owner).await;

    app.send(
        Method::POST,
        "/warehouse",
        Some(&owner),
        Some(json!({"name": "towels", "quantity": 5, "parLevel": 20, "lowStockThreshold": 2})),
    )
    .await;

    let (_, report) = app
        .send(
            Method::POST,
            &format!("/properties/{property}/reports"),
            Some(&owner),
            Some(counts(&[("Towels", json!(2)), ("Soap", json!(6))])),
        )
        .await;
    let report_id = report["reportId"].as_str().unwrap();

    let (status, plan) = app
        .send(
            Method::GET,
            &format!("/reports/{report_id}/restock-plan"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let lines = plan["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["itemName"], "Towels");
    assert_eq!(lines[0]["unitsNeeded"], 8);
    assert_eq!(lines[0]["unitsAvailable"], 5);
    assert_eq!(lines[0]["unitsFulfillable"], 5);
    assert_eq!(plan["fullyFulfillable"], false);

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/reports/{report_id}/restock-plan"),
            Some(&owner_token(Uuid::new_v4())),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/reports/{}/restock-plan", Uuid::new_v4()),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Assist
// ============================================================================

#[tokio::test]
async fn test_estimate_count() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());

    let (status, estimate) = app
        .send(
            Method::POST,
            "/assist/estimate-count",
            Some(&owner),
            Some(json!({"imageBase64": "aGVsbG8=", "itemName": "Towels"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(estimate["count"], 7);
    assert_eq!(estimate["description"], "7 Towels on the shelf");
}

#[tokio::test]
async fn test_estimate_count_input_errors() {
    let app = TestApp::new();
    let owner = owner_token(Uuid::new_v4());

    let cases = [
        (json!({"itemName": "Towels"}), "missing_image"),
        (json!({"imageBase64": "aGVsbG8="}), "missing_item_label"),
        (
            json!({"imageBase64": "%%%", "itemName": "Towels"}),
            "invalid_image_encoding",
        ),
    ];
    for (body, code) in cases {
        let (status, problem) = app
            .send(Method::POST, "/assist/estimate-count", Some(&owner), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["code"], code);
    }

    let (status, _) = app
        .send(
            Method::POST,
            "/assist/estimate-count",
            None,
            Some(json!({"imageBase64": "aGVsbG8=", "itemName": "Towels"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_estimate_count_unavailable_is_400() {
    let app = TestApp::with_assist(Arc::new(UnavailableCountingAssist));
    let owner = owner_token(Uuid::new_v4());

    let (status, problem) = app
        .send(
            Method::POST,
            "/assist/estimate-count",
            Some(&owner),
            Some(json!({"imageBase64": "aGVsbG8=", "itemName": "Towels"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "assist_unavailable");
}
