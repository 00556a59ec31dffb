use std::sync::Arc;

use domain::alert::entity::{OutboundSms, ProviderMessageId};
use domain::common::error::DomainError;
use ports::secondary::sms_transport::SmsTransport;

/// Single-shot send application service.
///
/// The degenerate case of the dispatch contract: one recipient, one
/// transport invocation, no persisted record and no fan-out. Caller
/// authentication happens at the API boundary before this service runs.
pub struct SmsSendService {
    transport: Arc<dyn SmsTransport>,
    from_address: String,
}

impl SmsSendService {
    pub fn new(transport: Arc<dyn SmsTransport>, from_address: String) -> Self {
        Self {
            transport,
            from_address,
        }
    }

    /// Validate the pair and perform exactly one transport invocation.
    pub async fn send_single(&self, to: &str, message: &str) -> Result<ProviderMessageId, DomainError> {
        if to.trim().is_empty() {
            return Err(DomainError::InvalidArgument(
                "the \"to\" parameter is required".to_string(),
            ));
        }
        if message.trim().is_empty() {
            return Err(DomainError::InvalidArgument(
                "the \"message\" parameter is required".to_string(),
            ));
        }

        let sms = OutboundSms {
            from: self.from_address.clone(),
            to: to.to_string(),
            body: message.to_string(),
        };
        let provider_id = self.transport.send(&sms).await?;
        tracing::info!(to = %sms.to, provider_id = %provider_id, "single-shot SMS sent");
        Ok(provider_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingTransport {
        calls: AtomicU32,
        fail: bool,
    }

    impl SmsTransport for CountingTransport {
        fn send<'a>(
            &'a self,
            _sms: &'a OutboundSms,
        ) -> Pin<Box<dyn Future<Output = Result<ProviderMessageId, DomainError>> + Send + 'a>>
        {
            self.calls.fetch_add(1, Ordering::Relaxed);
            let fail = self.fail;
            Box::pin(async move {
                if fail {
                    Err(DomainError::TransportError("provider down".to_string()))
                } else {
                    Ok(ProviderMessageId("SM42".to_string()))
                }
            })
        }
    }

    fn make_service(fail: bool) -> (SmsSendService, Arc<CountingTransport>) {
        let transport = Arc::new(CountingTransport {
            calls: AtomicU32::new(0),
            fail,
        });
        let service = SmsSendService::new(
            Arc::clone(&transport) as Arc<dyn SmsTransport>,
            "+15550000".to_string(),
        );
        (service, transport)
    }

    #[tokio::test]
    async fn success_returns_provider_id() {
        let (service, transport) = make_service(false);
        let id = service.send_single("+15550001", "help").await.unwrap();
        assert_eq!(id.0, "SM42");
        assert_eq!(transport.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn missing_to_rejected_before_transport() {
        let (service, transport) = make_service(false);
        let err = service.send_single("", "help").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(transport.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn missing_message_rejected_before_transport() {
        let (service, transport) = make_service(false);
        let err = service.send_single("+15550001", "  ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(transport.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let (service, transport) = make_service(true);
        let err = service.send_single("+15550001", "help").await.unwrap_err();
        assert!(matches!(err, DomainError::TransportError(_)));
        assert_eq!(transport.calls.load(Ordering::Relaxed), 1);
    }
}
