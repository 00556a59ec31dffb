// Focused sub-traits for recording Prometheus metrics.
//
// All methods take `&self` because the underlying implementation uses
// atomic operations (interior mutability via `prometheus-client`).
//
// Default implementations are no-ops, allowing test mocks to implement
// only the sub-traits relevant to the service under test.

/// Dispatch pipeline metrics.
pub trait DispatchMetrics: Send + Sync {
    /// Record a dispatch invocation outcome: "completed", "skipped", "failed".
    fn record_dispatch(&self, _outcome: &str) {}

    /// Record one per-recipient delivery result: "success" or "failure".
    fn record_delivery(&self, _result: &str) {}
}

/// SMS transport metrics.
pub trait TransportMetrics: Send + Sync {
    /// Record one transport invocation result: "accepted" or "error".
    fn record_sms_send(&self, _result: &str) {}
}

/// Combined metrics port used where a service records across groups.
pub trait MetricsPort: DispatchMetrics + TransportMetrics {}

impl<T: DispatchMetrics + TransportMetrics> MetricsPort for T {}
