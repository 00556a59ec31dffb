use domain::alert::entity::{AlertRecord, ClaimOutcome, DeliveryResult, NewAlert};
use domain::alert::error::AlertError;

/// Pluggable persistent alert store.
///
/// Implementations must make `claim_for_dispatch` and `commit_delivery`
/// atomic with respect to each other: the claim is the idempotency guard
/// that keeps a redelivered creation event from dispatching twice.
///
/// Methods are synchronous — the redb implementation is a local embedded
/// database and callers run on the blocking-tolerant dispatch path.
pub trait AlertStore: Send + Sync {
    /// Persist a new, unsent record. The store assigns the id.
    fn insert_alert(&self, alert: NewAlert) -> Result<AlertRecord, AlertError>;

    /// Retrieve a single record by its id.
    fn get_alert(&self, id: &str) -> Result<Option<AlertRecord>, AlertError>;

    /// Conditionally claim a record for dispatch.
    ///
    /// Succeeds only if the record exists, is unsent, and is unclaimed;
    /// the winning caller receives the authoritative record copy. Losing
    /// callers get `AlreadyTaken` and must not issue transport calls.
    fn claim_for_dispatch(&self, id: &str) -> Result<ClaimOutcome, AlertError>;

    /// Commit a processed record: set `sent`, assign `sent_timestamp_ms`,
    /// and write the full delivery results in a single atomic update.
    /// Returns the updated record.
    fn commit_delivery(
        &self,
        id: &str,
        results: &[DeliveryResult],
    ) -> Result<AlertRecord, AlertError>;

    /// Total number of stored records.
    fn alert_count(&self) -> Result<usize, AlertError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the trait is object-safe (can be used as `dyn AlertStore`).
    #[test]
    fn trait_is_object_safe() {
        fn _accepts_dyn(_store: &dyn AlertStore) {}
    }
}
