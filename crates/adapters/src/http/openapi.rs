use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::alert_handler::{AlertResponse, CreateAlertRequest, DeliveryResultResponse};
use super::error::{ErrorBody, ErrorDetail};
use super::health_handler::{HealthResponse, ReadyResponse};
use super::message_handler::{SendMessageRequest, SendMessageResponse};

/// OpenAPI document for the REST API, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Alert Dispatch API",
        description = "Emergency SMS alert dispatch service"
    ),
    paths(
        super::health_handler::healthz,
        super::health_handler::readyz,
        super::metrics_handler::metrics,
        super::message_handler::send_message,
        super::alert_handler::create_alert,
        super::alert_handler::get_alert,
    ),
    components(schemas(
        HealthResponse,
        ReadyResponse,
        SendMessageRequest,
        SendMessageResponse,
        CreateAlertRequest,
        AlertResponse,
        DeliveryResultResponse,
        ErrorBody,
        ErrorDetail,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Observability", description = "Prometheus metrics"),
        (name = "Messages", description = "Single-shot SMS sends"),
        (name = "Alerts", description = "Emergency alert records and dispatch"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/healthz"));
        assert!(paths.iter().any(|p| *p == "/readyz"));
        assert!(paths.iter().any(|p| *p == "/metrics"));
        assert!(paths.iter().any(|p| *p == "/api/v1/messages"));
        assert!(paths.iter().any(|p| *p == "/api/v1/alerts"));
        assert!(paths.iter().any(|p| *p == "/api/v1/alerts/{id}"));
    }

    #[test]
    fn document_serializes_to_json() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("Alert Dispatch API"));
    }
}
