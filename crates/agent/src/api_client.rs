use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// HTTP client for the alert dispatch REST API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

// ── Response DTOs ──────────────────────────────────────────────────────

#[derive(Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub dispatcher_running: bool,
    pub store_reachable: bool,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub message_id: String,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub id: String,
    pub message: String,
    pub recipients: Vec<String>,
    pub sent: bool,
    #[serde(default)]
    pub sent_timestamp: Option<u64>,
    #[serde(default)]
    pub delivery_results: Vec<DeliveryResultResponse>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResultResponse {
    pub phone_number: String,
    pub success: bool,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    code: String,
    message: String,
}

impl ApiClient {
    pub fn new(host: &str, port: u16, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: format!("http://{host}:{port}"),
            token,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    // ── Health ──────────────────────────────────────────────────────

    pub async fn healthz(&self) -> anyhow::Result<HealthResponse> {
        let resp = self
            .request(reqwest::Method::GET, "/healthz")
            .send()
            .await
            .map_err(|e| connection_error(&self.base_url, &e))?;
        handle_response(resp).await
    }

    pub async fn readyz(&self) -> anyhow::Result<ReadyResponse> {
        let resp = self
            .request(reqwest::Method::GET, "/readyz")
            .send()
            .await
            .map_err(|e| connection_error(&self.base_url, &e))?;
        handle_response(resp).await
    }

    // ── Metrics ─────────────────────────────────────────────────────

    pub async fn metrics(&self) -> anyhow::Result<String> {
        let resp = self
            .request(reqwest::Method::GET, "/metrics")
            .send()
            .await
            .map_err(|e| connection_error(&self.base_url, &e))?;
        if resp.status().is_success() {
            return resp.text().await.context("failed to read metrics body");
        }
        bail!("request failed with status {}", resp.status());
    }

    // ── Messages ────────────────────────────────────────────────────

    pub async fn send_message(
        &self,
        to: &str,
        message: &str,
    ) -> anyhow::Result<SendMessageResponse> {
        let resp = self
            .request(reqwest::Method::POST, "/api/v1/messages")
            .json(&serde_json::json!({ "to": to, "message": message }))
            .send()
            .await
            .map_err(|e| connection_error(&self.base_url, &e))?;
        handle_response(resp).await
    }

    // ── Alerts ──────────────────────────────────────────────────────

    pub async fn create_alert(
        &self,
        message: &str,
        recipients: &[String],
    ) -> anyhow::Result<AlertResponse> {
        let resp = self
            .request(reqwest::Method::POST, "/api/v1/alerts")
            .json(&serde_json::json!({ "message": message, "recipients": recipients }))
            .send()
            .await
            .map_err(|e| connection_error(&self.base_url, &e))?;
        handle_response(resp).await
    }

    pub async fn get_alert(&self, id: &str) -> anyhow::Result<AlertResponse> {
        let resp = self
            .request(reqwest::Method::GET, &format!("/api/v1/alerts/{id}"))
            .send()
            .await
            .map_err(|e| connection_error(&self.base_url, &e))?;
        handle_response(resp).await
    }
}

fn connection_error(base_url: &str, err: &reqwest::Error) -> anyhow::Error {
    if err.is_connect() {
        anyhow::anyhow!("cannot connect to service at {base_url}, is it running?")
    } else if err.is_timeout() {
        anyhow::anyhow!("connection to service at {base_url} timed out")
    } else {
        anyhow::anyhow!("request to service failed: {err}")
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> anyhow::Result<T> {
    if resp.status().is_success() {
        return resp
            .json::<T>()
            .await
            .context("failed to parse response body");
    }
    let status = resp.status();
    if let Ok(body) = resp.json::<ApiErrorBody>().await {
        bail!("{} ({}): {}", body.error.message, body.error.code, status);
    }
    bail!("request failed with status {status}");
}
