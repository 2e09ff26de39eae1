//! HTTP counting assist against a mock vision service.

use std::time::Duration;

use parstock_assist::{
    AssistConfig, AssistError, CountingAssist, EstimateRequest, HttpCountingAssist,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> EstimateRequest {
    EstimateRequest::new(vec![1, 2, 3], "Bath towels", None).unwrap()
}

fn assist(server: &MockServer) -> HttpCountingAssist {
    HttpCountingAssist::new(AssistConfig::new(format!("{}/v1/count", server.uri()))).unwrap()
}

#[tokio::test]
async fn test_successful_estimate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/count"))
        .and(body_json(json!({
            "image_base64": "AQID",
            "mime_type": "image/jpeg",
            "item_label": "Bath towels"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 7,
            "confidence": 0.82,
            "description": "Seven folded towels on the top shelf"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let estimate = assist(&server).estimate_count(&request()).await.unwrap();
    assert_eq!(estimate.count, 7);
    assert!((estimate.confidence - 0.82).abs() < f64::EPSILON);
    assert_eq!(estimate.description, "Seven folded towels on the top shelf");
}

#[tokio::test]
async fn test_api_key_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/count"))
        .and(header("authorization", "Bearer vision-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "confidence": 0.5,
            "description": "one"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = AssistConfig::new(format!("{}/v1/count", server.uri())).with_api_key("vision-key");
    let assist = HttpCountingAssist::new(config).unwrap();
    assert_eq!(assist.estimate_count(&request()).await.unwrap().count, 1);
}

#[tokio::test]
async fn test_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/count"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = assist(&server).estimate_count(&request()).await.unwrap_err();
    assert!(matches!(err, AssistError::Upstream { status: 503 }));
}

#[tokio::test]
async fn test_negative_count_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": -2,
            "confidence": 0.9,
            "description": "?"
        })))
        .mount(&server)
        .await;

    let err = assist(&server).estimate_count(&request()).await.unwrap_err();
    assert!(matches!(err, AssistError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_non_json_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = assist(&server).estimate_count(&request()).await.unwrap_err();
    assert!(matches!(err, AssistError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/count"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"count": 1, "confidence": 1.0, "description": ""}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = AssistConfig::new(format!("{}/v1/count", server.uri()))
        .with_timeout(Duration::from_millis(100));
    let assist = HttpCountingAssist::new(config).unwrap();
    let err = assist.estimate_count(&request()).await.unwrap_err();
    assert!(matches!(err, AssistError::Timeout));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then release an ephemeral port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let uri = format!("http://{addr}/v1/count");

    let assist = HttpCountingAssist::new(AssistConfig::new(uri)).unwrap();
    let err = assist.estimate_count(&request()).await.unwrap_err();
    assert!(matches!(err, AssistError::Transport(_)));
}
