use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use application::alert_intake_service::AlertIntakeService;
use application::sms_send_service::SmsSendService;
use infrastructure::metrics::ServiceMetrics;
use ports::secondary::alert_store::AlertStore;
use ports::secondary::auth_provider::AuthProvider;

/// Shared application state for the REST API server.
///
/// Passed to Axum handlers via `State(Arc<AppState>)`.
pub struct AppState {
    pub metrics: Arc<ServiceMetrics>,
    pub start_time: Instant,
    pub version: &'static str,
    pub send_service: Arc<SmsSendService>,
    pub intake_service: Arc<AlertIntakeService>,
    pub store: Arc<dyn AlertStore>,
    pub auth_provider: Arc<dyn AuthProvider>,
    pub metrics_auth_required: bool,
    /// Set once the dispatcher run loop is consuming creation events.
    pub dispatcher_ready: Arc<AtomicBool>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        metrics: Arc<ServiceMetrics>,
        send_service: Arc<SmsSendService>,
        intake_service: Arc<AlertIntakeService>,
        store: Arc<dyn AlertStore>,
        auth_provider: Arc<dyn AuthProvider>,
        metrics_auth_required: bool,
        dispatcher_ready: Arc<AtomicBool>,
    ) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION"),
            send_service,
            intake_service,
            store,
            auth_provider,
            metrics_auth_required,
            dispatcher_ready,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{AlwaysOkProvider, make_test_state};
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    #[test]
    fn new_creates_valid_state() {
        let test = make_test_state(Arc::new(AlwaysOkProvider), false);
        assert!(!test.state.version.is_empty());
        assert!(test.state.dispatcher_ready.load(Ordering::Relaxed));
        assert!(!test.state.metrics_auth_required);
    }
}
