use ports::secondary::metrics_port::{DispatchMetrics, TransportMetrics};
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

// ── Label types ─────────────────────────────────────────────────────

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct OutcomeLabels {
    pub outcome: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ResultLabels {
    pub result: String,
}

// ── Service metrics registry ────────────────────────────────────────

/// Prometheus metrics registry for the dispatch service.
///
/// All metric families use interior mutability (atomics), so recording
/// metrics only requires `&self`. The registry itself is NOT Clone —
/// wrap in `Arc` for multi-task sharing.
pub struct ServiceMetrics {
    registry: Registry,
    pub dispatches_total: Family<OutcomeLabels, Counter>,
    pub deliveries_total: Family<ResultLabels, Counter>,
    pub sms_sends_total: Family<ResultLabels, Counter>,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let dispatches_total = Family::<OutcomeLabels, Counter>::default();
        registry.register(
            "alert_dispatches",
            "Dispatch invocations by outcome (completed, skipped, failed)",
            dispatches_total.clone(),
        );

        let deliveries_total = Family::<ResultLabels, Counter>::default();
        registry.register(
            "alert_deliveries",
            "Per-recipient delivery results (success, failure)",
            deliveries_total.clone(),
        );

        let sms_sends_total = Family::<ResultLabels, Counter>::default();
        registry.register(
            "sms_sends",
            "SMS transport invocations by result (accepted, error)",
            sms_sends_total.clone(),
        );

        Self {
            registry,
            dispatches_total,
            deliveries_total,
            sms_sends_total,
        }
    }

    /// Encode all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buf = String::new();
        // encode only fails on a formatter error, which String never produces
        let _ = prometheus_client::encoding::text::encode(&mut buf, &self.registry);
        buf
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchMetrics for ServiceMetrics {
    fn record_dispatch(&self, outcome: &str) {
        self.dispatches_total
            .get_or_create(&OutcomeLabels {
                outcome: outcome.to_string(),
            })
            .inc();
    }

    fn record_delivery(&self, result: &str) {
        self.deliveries_total
            .get_or_create(&ResultLabels {
                result: result.to_string(),
            })
            .inc();
    }
}

impl TransportMetrics for ServiceMetrics {
    fn record_sms_send(&self, result: &str) {
        self.sms_sends_total
            .get_or_create(&ResultLabels {
                result: result.to_string(),
            })
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_metrics_appear_in_exposition() {
        let metrics = ServiceMetrics::new();
        metrics.record_dispatch("completed");
        metrics.record_delivery("success");
        metrics.record_delivery("failure");
        metrics.record_sms_send("accepted");

        let text = metrics.encode();
        assert!(text.contains("alert_dispatches_total"));
        assert!(text.contains("outcome=\"completed\""));
        assert!(text.contains("alert_deliveries_total"));
        assert!(text.contains("result=\"failure\""));
        assert!(text.contains("sms_sends_total"));
    }

    #[test]
    fn counters_accumulate() {
        let metrics = ServiceMetrics::new();
        metrics.record_sms_send("accepted");
        metrics.record_sms_send("accepted");
        assert_eq!(
            metrics
                .sms_sends_total
                .get_or_create(&ResultLabels {
                    result: "accepted".to_string(),
                })
                .get(),
            2
        );
    }
}
