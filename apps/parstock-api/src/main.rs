//! parstock API server.
//!
//! Serves the inventory API, health probes, Prometheus metrics and the
//! `OpenAPI` document for short-term rental consumable tracking.

mod config;
mod health;
mod logging;
mod metrics;
mod openapi;
mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use parstock_api_inventory::{inventory_router, InventoryState, JwtVerifier};
use parstock_assist::{AssistConfig, CountingAssist, HttpCountingAssist, UnavailableCountingAssist};
use parstock_auth::ValidationConfig;
use parstock_db::{
    run_migrations, DbPool, PgCleanerStore, PgPropertyStore, PgReportStore, PgWarehouseStore,
};
use parstock_inventory::{
    AccessGate, CatalogService, CompletenessPolicy, ReconciliationService, StaticPlanGate,
    WarehouseService,
};

use crate::config::Config;
use crate::health::{health_handler, livez_handler, readyz_handler};
use crate::logging::init_logging;
use crate::metrics::{metrics_handler, metrics_middleware, MetricsRegistry};
use crate::state::AppState;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.rust_log);
    info!(config = ?config, "Starting parstock-api");
    if config.app_env.is_production() && config.cors_origins.iter().any(|o| o == "*") {
        warn!("CORS_ORIGINS allows any origin in production");
    }

    let pool = match DbPool::connect_with(&config.database_url, config.db_max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        error!(error = %e, "Failed to run database migrations");
        std::process::exit(1);
    }

    let assist = match build_assist(&config) {
        Ok(assist) => assist,
        Err(e) => {
            error!(error = %e, "Failed to initialize counting assist");
            std::process::exit(1);
        }
    };

    let inventory = build_inventory_state(&config, &pool, assist);
    let state = AppState::new(
        pool.clone(),
        config.db_max_connections,
        Arc::new(MetricsRegistry::new()),
    );
    let shutting_down = state.shutting_down.clone();
    let app = build_app(state, inventory, build_cors_layer(&config.cors_origins));

    let addr = config.bind_address();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %addr, "Failed to bind listener");
            std::process::exit(1);
        }
    };
    info!(addr = %addr, env = %config.app_env, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutting_down))
        .await
    {
        error!(error = %e, "Server error");
    }

    pool.close().await;
    info!("Shutdown complete");
}

/// Vision client when an endpoint is configured, otherwise a stub that
/// reports the assist as unavailable.
fn build_assist(
    config: &Config,
) -> Result<Arc<dyn CountingAssist>, parstock_assist::AssistError> {
    let Some(settings) = &config.assist else {
        warn!("ASSIST_ENDPOINT not set, counting assist disabled");
        return Ok(Arc::new(UnavailableCountingAssist));
    };

    let mut assist_config =
        AssistConfig::new(settings.endpoint.clone()).with_timeout(settings.timeout);
    if let Some(key) = &settings.api_key {
        assist_config = assist_config.with_api_key(key.clone());
    }
    Ok(Arc::new(HttpCountingAssist::new(assist_config)?))
}

fn build_inventory_state(
    config: &Config,
    pool: &DbPool,
    assist: Arc<dyn CountingAssist>,
) -> InventoryState {
    let properties = Arc::new(PgPropertyStore::new(pool.clone()));
    let reports = Arc::new(PgReportStore::new(pool.clone()));
    let warehouse = Arc::new(PgWarehouseStore::new(pool.clone()));
    let cleaners = Arc::new(PgCleanerStore::new(pool.clone()));
    let access = AccessGate::new(cleaners);

    let policy = if config.require_complete_counts {
        CompletenessPolicy::RequireComplete
    } else {
        CompletenessPolicy::default()
    };

    let mut validation = ValidationConfig::default();
    if let Some(issuer) = &config.jwt_issuer {
        validation = validation.issuer(issuer.clone());
    }

    InventoryState {
        catalog: Arc::new(CatalogService::new(
            properties.clone(),
            Arc::new(StaticPlanGate::new(config.plan_max_properties)),
            access.clone(),
        )),
        reconciliation: Arc::new(
            ReconciliationService::new(
                properties,
                reports,
                warehouse.clone(),
                access.clone(),
            )
            .with_policy(policy),
        ),
        warehouse: Arc::new(WarehouseService::new(warehouse, access.clone())),
        access,
        assist,
        verifier: JwtVerifier::new(config.jwt_public_key.as_bytes(), validation),
    }
}

/// Compose inventory routes, operational endpoints and docs.
fn build_app(state: AppState, inventory: InventoryState, cors: CorsLayer) -> Router {
    let metrics = state.metrics.clone();

    Router::new()
        .route("/health", get(health_handler))
        .route("/livez", get(livez_handler))
        .route("/readyz", get(readyz_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .merge(inventory_router(inventory))
        .merge(openapi::swagger_routes())
        .layer(axum::middleware::from_fn_with_state(
            metrics,
            metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    use tower_http::cors::AllowOrigin;

    let is_wildcard = origins.len() == 1 && origins[0] == "*";

    let allow_origin = if is_wildcard {
        AllowOrigin::any()
    } else {
        let allowed: Vec<axum::http::HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();
        AllowOrigin::list(allowed)
    };

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .max_age(Duration::from_secs(3600));

    // Credentials cannot be combined with wildcard methods or headers.
    if is_wildcard {
        layer = layer.allow_methods(Any).allow_headers(Any);
    } else {
        use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
        use axum::http::Method;
        layer = layer
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                AUTHORIZATION,
                CONTENT_TYPE,
                ACCEPT,
                ORIGIN,
                axum::http::HeaderName::from_static("x-request-id"),
            ])
            .allow_credentials(true);
    }

    layer
}

async fn shutdown_signal(shutting_down: Arc<AtomicBool>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    // Readiness must flip before axum starts draining connections.
    shutting_down.store(true, Ordering::Release);
    info!("Readiness probe set to unhealthy, draining traffic");
}
