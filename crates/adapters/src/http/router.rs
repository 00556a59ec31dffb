use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use utoipa::OpenApi;

/// Maximum request body size for API endpoints (64 KiB).
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Rate limit for write endpoints: 60 requests per 60 seconds per IP.
const WRITE_RATE_LIMIT_PER_SECOND: u64 = 1;
const WRITE_RATE_LIMIT_BURST: u32 = 60;

use super::alert_handler::{create_alert, get_alert};
use super::health_handler::{healthz, readyz};
use super::message_handler::send_message;
use super::metrics_handler::metrics;
use super::middleware::auth::auth_middleware;
use super::openapi::ApiDoc;
use super::state::AppState;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the main Axum router with all REST API routes.
///
/// Routes are split into three groups:
/// 1. **Public** (no auth): `/healthz`, `/readyz` — K8s probes
/// 2. **Metrics** (conditional auth): `/metrics` — auth only when configured
/// 3. **API** (protected): `/api/v1/*` — always authenticated
pub fn build_router(state: Arc<AppState>, serve_openapi: bool) -> Router {
    // Group 1: Public routes — never require auth (K8s probes)
    let public_routes = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz));

    // Group 2: Metrics route — conditionally protected
    let metrics_routes = {
        let r = Router::new().route("/metrics", get(metrics));
        if state.metrics_auth_required {
            r.layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                auth_middleware,
            ))
        } else {
            r
        }
    };

    // Group 3: Protected API routes — split into read and write
    //
    // Write routes get an additional per-IP rate limit (60 req/min).
    // Read routes have no rate limit.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(WRITE_RATE_LIMIT_PER_SECOND)
            .burst_size(WRITE_RATE_LIMIT_BURST)
            .finish()
            .expect("governor config should build"),
    );

    let api_routes = {
        let read_routes = Router::new().route("/api/v1/alerts/{id}", get(get_alert));

        let write_routes = Router::new()
            .route("/api/v1/messages", post(send_message))
            .route("/api/v1/alerts", post(create_alert))
            .layer(GovernorLayer::new(governor_conf));

        read_routes
            .merge(write_routes)
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
            .layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                auth_middleware,
            ))
    };

    let router = public_routes.merge(metrics_routes).merge(api_routes);

    let router = if serve_openapi {
        router.route("/api-docs/openapi.json", get(openapi_json))
    } else {
        router
    };

    router.with_state(state)
}
