use std::sync::Arc;

use domain::alert::entity::{AlertRecord, NewAlert};
use domain::alert::error::AlertError;
use ports::secondary::alert_store::AlertStore;
use tokio::sync::mpsc;

/// Alert intake application service.
///
/// The explicit "record created" trigger: validates intake input, persists
/// the record (the store assigns the id), and emits a typed creation event
/// to the dispatcher channel.
pub struct AlertIntakeService {
    store: Arc<dyn AlertStore>,
    created_tx: mpsc::Sender<AlertRecord>,
}

impl AlertIntakeService {
    pub fn new(store: Arc<dyn AlertStore>, created_tx: mpsc::Sender<AlertRecord>) -> Self {
        Self { store, created_tx }
    }

    /// Persist a new alert and notify the dispatcher.
    ///
    /// The record is durable before the event is emitted: if the dispatcher
    /// channel is closed (shutdown race), the record stays unsent and
    /// eligible for manual replay.
    pub async fn create_alert(&self, alert: NewAlert) -> Result<AlertRecord, AlertError> {
        alert
            .validate()
            .map_err(|msg| AlertError::InvalidRecord(msg.to_string()))?;

        let record = self.store.insert_alert(alert)?;
        tracing::info!(
            alert_id = %record.id,
            recipients = record.recipients.len(),
            "alert created"
        );

        if let Err(e) = self.created_tx.send(record.clone()).await {
            tracing::warn!(alert_id = %record.id, error = %e, "dispatcher channel closed; alert left unsent");
        }
        Ok(record)
    }

    pub fn get_alert(&self, id: &str) -> Result<Option<AlertRecord>, AlertError> {
        self.store.get_alert(id)
    }
}
