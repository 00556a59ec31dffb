use std::sync::Arc;

use domain::alert::entity::{
    AlertRecord, ClaimOutcome, DeliveryResult, DispatchOutcome, OutboundSms, SkipReason,
};
use ports::secondary::alert_store::AlertStore;
use ports::secondary::metrics_port::MetricsPort;
use ports::secondary::sms_transport::SmsTransport;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Alert dispatch application service.
///
/// Converts one freshly created, unsent `AlertRecord` into a processed
/// record with recorded per-recipient outcomes: claim the record, fan out
/// one concurrent transport call per recipient, fan in all results in
/// input order, and commit the outcome back to the store exactly once.
pub struct AlertDispatcher {
    store: Arc<dyn AlertStore>,
    transport: Arc<dyn SmsTransport>,
    /// Configured sender address, passed to the transport on every send.
    from_address: String,
    metrics: Arc<dyn MetricsPort>,
}

impl AlertDispatcher {
    pub fn new(
        store: Arc<dyn AlertStore>,
        transport: Arc<dyn SmsTransport>,
        from_address: String,
        metrics: Arc<dyn MetricsPort>,
    ) -> Self {
        Self {
            store,
            transport,
            from_address,
            metrics,
        }
    }

    /// Process a single creation event.
    ///
    /// The precondition check and the conditional claim both run before any
    /// transport call: a record that is already sent, already claimed, or
    /// has no recipients produces a skip with zero sends. The commit runs
    /// once, after every send has resolved.
    pub async fn dispatch(&self, record: &AlertRecord) -> DispatchOutcome {
        if record.sent {
            tracing::debug!(alert_id = %record.id, "dispatch skipped: alert already sent");
            self.metrics.record_dispatch("skipped");
            return DispatchOutcome::Skipped {
                reason: SkipReason::AlreadyProcessed,
            };
        }
        if record.recipients.is_empty() {
            tracing::debug!(alert_id = %record.id, "dispatch skipped: no recipients");
            self.metrics.record_dispatch("skipped");
            return DispatchOutcome::Skipped {
                reason: SkipReason::NoRecipients,
            };
        }

        // Atomic check-and-claim: a redelivered creation event loses the
        // claim here instead of racing the commit below.
        let current = match self.store.claim_for_dispatch(&record.id) {
            Ok(ClaimOutcome::Claimed(current)) => current,
            Ok(ClaimOutcome::AlreadyTaken) => {
                tracing::debug!(alert_id = %record.id, "dispatch skipped: claim already taken");
                self.metrics.record_dispatch("skipped");
                return DispatchOutcome::Skipped {
                    reason: SkipReason::AlreadyProcessed,
                };
            }
            Ok(ClaimOutcome::NotFound) => {
                tracing::error!(alert_id = %record.id, "dispatch failed: alert not in store");
                self.metrics.record_dispatch("failed");
                return DispatchOutcome::Failed {
                    error: format!("alert not found: {}", record.id),
                };
            }
            Err(e) => {
                tracing::error!(alert_id = %record.id, error = %e, "dispatch claim failed");
                self.metrics.record_dispatch("failed");
                return DispatchOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let results = self.send_all(&current).await;

        for result in &results {
            self.metrics
                .record_delivery(if result.success { "success" } else { "failure" });
        }

        match self.store.commit_delivery(&current.id, &results) {
            Ok(updated) => {
                tracing::info!(
                    alert_id = %updated.id,
                    recipients = updated.recipients.len(),
                    delivered = updated.delivery_results.iter().filter(|r| r.success).count(),
                    "alert processed"
                );
                self.metrics.record_dispatch("completed");
                DispatchOutcome::Completed {
                    results: updated.delivery_results,
                }
            }
            Err(e) => {
                // The record stays unsent; replay is a manual operator action.
                tracing::error!(alert_id = %current.id, error = %e, "alert commit failed");
                self.metrics.record_dispatch("failed");
                DispatchOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Fan-out/fan-in: spawn one send task per recipient, all before any
    /// result is awaited, then collect results in recipient order. Sibling
    /// failures (including panics) are captured per recipient and never
    /// propagate.
    async fn send_all(&self, record: &AlertRecord) -> Vec<DeliveryResult> {
        let handles: Vec<_> = record
            .recipients
            .iter()
            .map(|recipient| {
                let transport = Arc::clone(&self.transport);
                let sms = OutboundSms {
                    from: self.from_address.clone(),
                    to: recipient.clone(),
                    body: record.message.clone(),
                };
                tokio::spawn(async move {
                    match transport.send(&sms).await {
                        Ok(provider_id) => DeliveryResult::delivered(sms.to, provider_id),
                        Err(e) => DeliveryResult::failed(sms.to, e.to_string()),
                    }
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (handle, recipient) in handles.into_iter().zip(&record.recipients) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => DeliveryResult::failed(recipient.clone(), format!("send task failed: {e}")),
            };
            if !result.success {
                tracing::warn!(
                    alert_id = %record.id,
                    recipient = %result.recipient,
                    error = result.error_detail.as_deref().unwrap_or(""),
                    "SMS send failed"
                );
            }
            results.push(result);
        }
        results
    }

    /// Async run loop: consumes creation events from the channel, dispatches
    /// each one, and drains on cancellation.
    pub async fn run(
        self: Arc<Self>,
        mut rx: mpsc::Receiver<AlertRecord>,
        cancel_token: CancellationToken,
    ) {
        let mut count: u64 = 0;

        loop {
            tokio::select! {
                () = cancel_token.cancelled() => {
                    // Drain remaining creation events before exiting
                    while let Ok(record) = rx.try_recv() {
                        count += 1;
                        self.dispatch(&record).await;
                    }
                    break;
                }
                msg = rx.recv() => {
                    match msg {
                        Some(record) => {
                            count += 1;
                            self.dispatch(&record).await;
                        }
                        None => break, // channel closed
                    }
                }
            }
        }

        tracing::info!(total_alerts = count, "alert dispatcher stopped");
    }
}
