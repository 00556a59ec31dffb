use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::alert::entity::{AlertRecord, DeliveryResult, NewAlert};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::{ApiError, ErrorBody};
use super::state::AppState;

// ── Request DTOs ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAlertRequest {
    /// Message body sent to every recipient.
    pub message: String,
    /// Destination phone numbers. May be empty; the dispatcher skips
    /// such alerts.
    #[serde(default)]
    pub recipients: Vec<String>,
}

// ── Response DTOs ───────────────────────────────────────────────────

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub id: String,
    pub message: String,
    pub recipients: Vec<String>,
    pub sent: bool,
    /// Milliseconds since epoch, set once the alert is processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_timestamp: Option<u64>,
    /// One entry per recipient, same order as `recipients`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub delivery_results: Vec<DeliveryResultResponse>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResultResponse {
    pub phone_number: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<DeliveryResult> for DeliveryResultResponse {
    fn from(r: DeliveryResult) -> Self {
        Self {
            phone_number: r.recipient,
            success: r.success,
            message_id: r.provider_id,
            error: r.error_detail,
        }
    }
}

impl From<AlertRecord> for AlertResponse {
    fn from(r: AlertRecord) -> Self {
        Self {
            id: r.id,
            message: r.message,
            recipients: r.recipients,
            sent: r.sent,
            sent_timestamp: r.sent_timestamp_ms,
            delivery_results: r
                .delivery_results
                .into_iter()
                .map(DeliveryResultResponse::from)
                .collect(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

/// Create an emergency alert and hand it to the dispatcher.
///
/// Returns 202: the record is durable but delivery happens
/// asynchronously. Poll `GET /api/v1/alerts/{id}` for results.
#[utoipa::path(
    post, path = "/api/v1/alerts",
    tag = "Alerts",
    request_body = CreateAlertRequest,
    responses(
        (status = 202, description = "Alert persisted, dispatch in progress", body = AlertResponse),
        (status = 400, description = "Invalid alert", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
    ),
    security(("api_key" = []))
)]
pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<AlertResponse>), ApiError> {
    let record = state
        .intake_service
        .create_alert(NewAlert {
            message: req.message,
            recipients: req.recipients,
        })
        .await?;
    Ok((StatusCode::ACCEPTED, Json(AlertResponse::from(record))))
}

/// Fetch one alert record, including delivery results once processed.
#[utoipa::path(
    get, path = "/api/v1/alerts/{id}",
    tag = "Alerts",
    params(
        ("id" = String, Path, description = "Alert id"),
    ),
    responses(
        (status = 200, description = "Alert record", body = AlertResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 404, description = "Unknown alert id", body = ErrorBody),
    ),
    security(("api_key" = []))
)]
pub async fn get_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AlertResponse>, ApiError> {
    let record = state
        .intake_service
        .get_alert(&id)?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("alert {id} not found"),
        })?;
    Ok(Json(AlertResponse::from(record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::state::test_support::{AlwaysOkProvider, make_test_state};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, header};
    use axum::routing::{get, post};
    use http_body_util::BodyExt;
    use ports::secondary::alert_store::AlertStore;
    use tower::ServiceExt;

    fn build_router(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/api/v1/alerts", post(create_alert))
            .route("/api/v1/alerts/{id}", get(get_alert))
            .with_state(state)
    }

    async fn response_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn create_request(body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/api/v1/alerts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_returns_accepted_with_unsent_record() {
        let mut test = make_test_state(Arc::new(AlwaysOkProvider), false);
        let router = build_router(Arc::clone(&test.state));

        let resp = router
            .oneshot(create_request(
                r#"{"message":"Accident detected","recipients":["+15550001","+15550002"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let body = response_json(resp).await;
        assert_eq!(body["sent"], false);
        assert_eq!(body["recipients"].as_array().unwrap().len(), 2);
        assert!(body.get("sentTimestamp").is_none());

        // the creation event reached the dispatcher channel
        let event = test.created_rx.recv().await.unwrap();
        assert_eq!(event.id, body["id"].as_str().unwrap());
    }

    #[tokio::test]
    async fn create_rejects_empty_message() {
        let test = make_test_state(Arc::new(AlwaysOkProvider), false);
        let router = build_router(test.state);

        let resp = router
            .oneshot(create_request(r#"{"message":"","recipients":["+15550001"]}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = response_json(resp).await;
        assert_eq!(body["error"]["code"], "invalid-argument");
    }

    #[tokio::test]
    async fn get_unknown_id_is_404() {
        let test = make_test_state(Arc::new(AlwaysOkProvider), false);
        let router = build_router(test.state);

        let resp = router
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/v1/alerts/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = response_json(resp).await;
        assert_eq!(body["error"]["code"], "not-found");
    }

    #[tokio::test]
    async fn get_processed_alert_exposes_camel_case_results() {
        let test = make_test_state(Arc::new(AlwaysOkProvider), false);
        let record = test
            .store
            .insert_alert(NewAlert {
                message: "help".to_string(),
                recipients: vec!["+15550001".to_string(), "+15550002".to_string()],
            })
            .unwrap();
        test.store
            .commit_delivery(
                &record.id,
                &[
                    DeliveryResult::delivered(
                        "+15550001",
                        domain::alert::entity::ProviderMessageId("SM1".to_string()),
                    ),
                    DeliveryResult::failed("+15550002", "carrier error"),
                ],
            )
            .unwrap();

        let router = build_router(test.state);
        let resp = router
            .oneshot(
                HttpRequest::builder()
                    .uri(format!("/api/v1/alerts/{}", record.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = response_json(resp).await;
        assert_eq!(body["sent"], true);
        assert!(body["sentTimestamp"].is_u64());
        let results = body["deliveryResults"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["phoneNumber"], "+15550001");
        assert_eq!(results[0]["messageId"], "SM1");
        assert!(results[0].get("error").is_none());
        assert_eq!(results[1]["success"], false);
        assert_eq!(results[1]["error"], "carrier error");
        assert!(results[1].get("messageId").is_none());
    }
}
