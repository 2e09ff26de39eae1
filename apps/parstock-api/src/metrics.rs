//! Prometheus metrics collection and exposition.
//!
//! HTTP request counters and latency histograms labeled by method, route
//! pattern and status, plus a domain counter of report submissions by
//! outcome. Database pool gauges are collected when `/metrics` is scraped.

use std::fmt::Write;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use prometheus_client::{
    encoding::EncodeLabelSet,
    metrics::{counter::Counter, family::Family, histogram::Histogram},
    registry::Registry,
};

use crate::state::AppState;

/// Route pattern of the report submission endpoint.
pub const SUBMIT_REPORT_ROUTE: &str = "/properties/:id/reports";

/// Labels for HTTP request metrics: method, route pattern, and status code.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpRequestLabels {
    pub method: String,
    pub route: String,
    pub status: u16,
}

/// Labels for report submissions.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ReportLabels {
    /// `stored`, `rejected` or `failed`.
    pub outcome: String,
}

impl ReportLabels {
    /// Classify a submission by its response status.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        let outcome = if status.is_success() {
            "stored"
        } else if status.is_client_error() {
            "rejected"
        } else {
            "failed"
        };
        Self {
            outcome: outcome.to_string(),
        }
    }
}

/// HTTP metrics: request counter and duration histogram.
pub struct HttpMetrics {
    pub requests_total: Family<HttpRequestLabels, Counter>,
    pub request_duration_seconds: Family<HttpRequestLabels, Histogram>,
}

impl HttpMetrics {
    fn new() -> Self {
        Self {
            requests_total: Family::default(),
            request_duration_seconds: Family::new_with_constructor(|| {
                Histogram::new(
                    [
                        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                    ]
                    .into_iter(),
                )
            }),
        }
    }
}

/// Central metrics registry that owns all metric families.
pub struct MetricsRegistry {
    pub registry: Mutex<Registry>,
    pub http: Arc<HttpMetrics>,
    pub reports_submitted: Family<ReportLabels, Counter>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        let http = Arc::new(HttpMetrics::new());
        let reports_submitted = Family::<ReportLabels, Counter>::default();

        registry.register(
            "http_requests",
            "Total number of HTTP requests",
            http.requests_total.clone(),
        );
        registry.register(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
            http.request_duration_seconds.clone(),
        );
        registry.register(
            "reports_submitted",
            "Inventory report submissions by outcome",
            reports_submitted.clone(),
        );

        Self {
            registry: Mutex::new(registry),
            http,
            reports_submitted,
        }
    }

    /// Encode every registered family in text exposition format.
    pub fn encode(&self, buf: &mut String) -> std::fmt::Result {
        let registry = match self.registry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        prometheus_client::encoding::text::encode(buf, &registry)
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Records HTTP request metrics and report submission outcomes.
///
/// The matched route pattern is used as the `route` label so path ids do
/// not inflate cardinality. Unmatched routes use `"unmatched"`.
pub async fn metrics_middleware(
    State(metrics): State<Arc<MetricsRegistry>>,
    matched_path: Option<MatchedPath>,
    request: axum::http::Request<Body>,
    next: Next,
) -> Response {
    let is_submission = request.method() == Method::POST
        && matched_path
            .as_ref()
            .is_some_and(|m| m.as_str() == SUBMIT_REPORT_ROUTE);
    let method = request.method().to_string();
    let route = matched_path
        .as_ref()
        .map_or_else(|| "unmatched".to_string(), |m| m.as_str().to_string());

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let labels = HttpRequestLabels {
        method,
        route,
        status: response.status().as_u16(),
    };

    metrics.http.requests_total.get_or_create(&labels).inc();
    metrics
        .http
        .request_duration_seconds
        .get_or_create(&labels)
        .observe(duration);

    if is_submission {
        metrics
            .reports_submitted
            .get_or_create(&ReportLabels::from_status(response.status()))
            .inc();
    }

    response
}

/// Handler for `GET /metrics`: Prometheus text exposition format.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut buf = String::new();

    if let Err(e) = state.metrics.encode(&mut buf) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to encode metrics",
        )
            .into_response();
    }

    let (pool_size, pool_idle) = state.db.stats();
    let pool_size = i64::from(pool_size);
    let pool_idle = i64::try_from(pool_idle).unwrap_or(i64::MAX);
    let pool_active = (pool_size - pool_idle).max(0);
    let pool_max = state.db_max_connections;

    let _ = writeln!(
        buf,
        "# HELP db_pool_connections_active Number of active database connections"
    );
    let _ = writeln!(buf, "# TYPE db_pool_connections_active gauge");
    let _ = writeln!(buf, "db_pool_connections_active {pool_active}");
    let _ = writeln!(
        buf,
        "# HELP db_pool_connections_idle Number of idle database connections"
    );
    let _ = writeln!(buf, "# TYPE db_pool_connections_idle gauge");
    let _ = writeln!(buf, "db_pool_connections_idle {pool_idle}");
    let _ = writeln!(
        buf,
        "# HELP db_pool_connections_max Maximum database connections configured"
    );
    let _ = writeln!(buf, "# TYPE db_pool_connections_max gauge");
    let _ = writeln!(buf, "db_pool_connections_max {pool_max}");

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        buf,
    )
        .into_response()
}
