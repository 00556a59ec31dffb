use std::future::Future;
use std::pin::Pin;

use domain::alert::entity::{OutboundSms, ProviderMessageId};
use domain::common::error::DomainError;

/// Secondary port for the SMS transport capability.
///
/// Uses `Pin<Box<dyn Future>>` return type (instead of RPITIT) so the trait
/// is dyn-compatible and can be used as `Arc<dyn SmsTransport>`.
///
/// One call is one transport invocation: the port performs no retry and no
/// batching. A provider-assigned message id is returned on acceptance.
pub trait SmsTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        sms: &'a OutboundSms,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderMessageId, DomainError>> + Send + 'a>>;
}
