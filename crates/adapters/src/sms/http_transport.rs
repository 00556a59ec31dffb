use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use domain::alert::entity::{OutboundSms, ProviderMessageId};
use domain::common::error::DomainError;
use infrastructure::constants::SMS_API_TIMEOUT;
use ports::secondary::metrics_port::MetricsPort;
use ports::secondary::sms_transport::SmsTransport;
use serde::Deserialize;

/// SMS transport backed by a Twilio-compatible messaging REST API.
///
/// One `send` is one `POST {api_url}/Accounts/{sid}/Messages.json` with
/// basic auth and a form body. No retry: a failed request surfaces as a
/// transport error for the caller to record.
pub struct HttpSmsTransport {
    client: reqwest::Client,
    api_url: String,
    account_sid: String,
    auth_token: String,
    metrics: Arc<dyn MetricsPort>,
}

/// Provider response for an accepted message.
#[derive(Debug, Deserialize)]
struct MessageCreated {
    sid: String,
}

/// Provider error body, when present.
#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}

impl HttpSmsTransport {
    pub fn new(
        api_url: String,
        account_sid: String,
        auth_token: String,
        metrics: Arc<dyn MetricsPort>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            account_sid,
            auth_token,
            metrics,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/Accounts/{}/Messages.json", self.api_url, self.account_sid)
    }
}

impl SmsTransport for HttpSmsTransport {
    fn send<'a>(
        &'a self,
        sms: &'a OutboundSms,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderMessageId, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let params = [("To", &sms.to), ("From", &sms.from), ("Body", &sms.body)];

            let result = async {
                let response = self
                    .client
                    .post(self.messages_url())
                    .basic_auth(&self.account_sid, Some(&self.auth_token))
                    .form(&params)
                    .timeout(SMS_API_TIMEOUT)
                    .send()
                    .await
                    .map_err(|e| DomainError::TransportError(format!("SMS API request failed: {e}")))?;

                let status = response.status();
                if !status.is_success() {
                    let detail = response
                        .json::<ProviderError>()
                        .await
                        .ok()
                        .and_then(|e| e.message)
                        .unwrap_or_else(|| "no error detail".to_string());
                    return Err(DomainError::TransportError(format!(
                        "SMS API returned HTTP {status}: {detail}"
                    )));
                }

                let created: MessageCreated = response.json().await.map_err(|e| {
                    DomainError::TransportError(format!("SMS API response parse failed: {e}"))
                })?;
                Ok(ProviderMessageId(created.sid))
            }
            .await;

            match &result {
                Ok(provider_id) => {
                    self.metrics.record_sms_send("accepted");
                    tracing::debug!(to = %sms.to, provider_id = %provider_id, "SMS accepted by provider");
                }
                Err(e) => {
                    self.metrics.record_sms_send("error");
                    tracing::warn!(to = %sms.to, error = %e, "SMS transport call failed");
                }
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ports::secondary::metrics_port::{DispatchMetrics, TransportMetrics};
    use std::sync::Mutex;

    struct TestMetrics {
        send_results: Mutex<Vec<String>>,
    }

    impl TestMetrics {
        fn new() -> Self {
            Self {
                send_results: Mutex::new(Vec::new()),
            }
        }
    }

    impl DispatchMetrics for TestMetrics {}
    impl TransportMetrics for TestMetrics {
        fn record_sms_send(&self, result: &str) {
            self.send_results.lock().unwrap().push(result.to_string());
        }
    }

    fn sample_sms() -> OutboundSms {
        OutboundSms {
            from: "+15550000".to_string(),
            to: "+15550001".to_string(),
            body: "Accident detected".to_string(),
        }
    }

    #[test]
    fn messages_url_is_account_scoped() {
        let metrics = Arc::new(TestMetrics::new());
        let transport = HttpSmsTransport::new(
            "https://api.example.com/2010-04-01/".to_string(),
            "AC123".to_string(),
            "token".to_string(),
            metrics as Arc<dyn MetricsPort>,
        );
        assert_eq!(
            transport.messages_url(),
            "https://api.example.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[tokio::test]
    async fn unreachable_api_yields_transport_error_and_metric() {
        let metrics = Arc::new(TestMetrics::new());
        let transport = HttpSmsTransport::new(
            "http://127.0.0.1:1".to_string(),
            "AC123".to_string(),
            "token".to_string(),
            Arc::clone(&metrics) as Arc<dyn MetricsPort>,
        );

        let err = transport.send(&sample_sms()).await.unwrap_err();
        assert!(matches!(err, DomainError::TransportError(_)));
        assert_eq!(*metrics.send_results.lock().unwrap(), vec!["error"]);
    }

    #[test]
    fn created_response_parses_sid() {
        let created: MessageCreated =
            serde_json::from_str(r#"{"sid":"SM1","status":"queued","to":"+15550001"}"#).unwrap();
        assert_eq!(created.sid, "SM1");
    }

    #[test]
    fn error_response_parses_optional_message() {
        let err: ProviderError =
            serde_json::from_str(r#"{"code":21211,"message":"Invalid 'To' number"}"#).unwrap();
        assert_eq!(err.message.as_deref(), Some("Invalid 'To' number"));

        let empty: ProviderError = serde_json::from_str("{}").unwrap();
        assert!(empty.message.is_none());
    }
}
