use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use utoipa::ToSchema;

use super::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"`.
    #[schema(value_type = String)]
    pub status: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    /// `"ready"` or `"not_ready"`.
    #[schema(value_type = String)]
    pub status: &'static str,
    /// Whether the dispatcher run loop is consuming creation events.
    pub dispatcher_running: bool,
    /// Whether the alert store answered a probe query.
    pub store_reachable: bool,
}

/// Liveness probe — always returns 200 if the process is running.
#[utoipa::path(
    get, path = "/healthz",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse),
    )
)]
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Readiness probe — 200 when the dispatcher is running and the store
/// answers queries, 503 otherwise.
#[utoipa::path(
    get, path = "/readyz",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Service is not ready", body = ReadyResponse),
    )
)]
pub async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dispatcher_running = state.dispatcher_ready.load(Ordering::Relaxed);
    let store_reachable = state.store.alert_count().is_ok();
    let ready = dispatcher_running && store_reachable;

    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        code,
        Json(ReadyResponse {
            status: if ready { "ready" } else { "not_ready" },
            dispatcher_running,
            store_reachable,
        }),
    )
}
