use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::alert::entity::{OutboundSms, ProviderMessageId};
use domain::common::error::DomainError;
use ports::secondary::sms_transport::SmsTransport;

/// SMS transport that logs messages via tracing instead of sending them.
///
/// Used in development and tests; every send succeeds with a synthetic
/// sequential id.
pub struct LogSmsTransport {
    seq: AtomicU64,
}

impl LogSmsTransport {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(1),
        }
    }
}

impl Default for LogSmsTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsTransport for LogSmsTransport {
    fn send<'a>(
        &'a self,
        sms: &'a OutboundSms,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderMessageId, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let n = self.seq.fetch_add(1, Ordering::Relaxed);
            let id = ProviderMessageId(format!("log-{n}"));
            tracing::info!(
                from = %sms.from,
                to = %sms.to,
                body = %sms.body,
                provider_id = %id,
                "SMS sent to log"
            );
            Ok(id)
        })
    }
}
