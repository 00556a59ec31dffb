use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use domain::alert::entity::{AlertRecord, ClaimOutcome, DeliveryResult, NewAlert};
use domain::alert::error::AlertError;
use ports::secondary::alert_store::AlertStore;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};

/// redb table: key = alert id, value = JSON-serialized `AlertRecord`.
const ALERT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("alerts");

/// Persistent alert store backed by redb.
///
/// Records are keyed by a store-assigned id. The claim and the commit each
/// run inside one serialized write transaction, which is what makes
/// `claim_for_dispatch` a safe idempotency guard under duplicate
/// creation-event delivery.
pub struct RedbAlertStore {
    db: Database,
    /// Serialize writers so read-modify-write updates are atomic.
    write_lock: Mutex<()>,
    /// Disambiguates ids assigned within the same millisecond.
    seq: AtomicU64,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

impl RedbAlertStore {
    /// Open (or create) a redb database at `path`.
    pub fn open(path: &Path) -> Result<Self, AlertError> {
        let db = Database::create(path)
            .map_err(|e| AlertError::StoreFailed(format!("redb open failed: {e}")))?;

        // Ensure the table exists.
        let txn = db
            .begin_write()
            .map_err(|e| AlertError::StoreFailed(format!("redb txn begin: {e}")))?;
        {
            let _table = txn
                .open_table(ALERT_TABLE)
                .map_err(|e| AlertError::StoreFailed(format!("redb table create: {e}")))?;
        }
        txn.commit()
            .map_err(|e| AlertError::StoreFailed(format!("redb commit: {e}")))?;

        Ok(Self {
            db,
            write_lock: Mutex::new(()),
            seq: AtomicU64::new(1),
        })
    }

    fn next_id(&self) -> String {
        format!("{}-{}", now_ms(), self.seq.fetch_add(1, Ordering::Relaxed))
    }

    fn read_record(&self, id: &str) -> Result<Option<AlertRecord>, AlertError> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| AlertError::QueryFailed(format!("redb read txn: {e}")))?;
        let table = txn
            .open_table(ALERT_TABLE)
            .map_err(|e| AlertError::QueryFailed(format!("redb read table: {e}")))?;
        let Some(value) = table
            .get(id)
            .map_err(|e| AlertError::QueryFailed(format!("redb get: {e}")))?
        else {
            return Ok(None);
        };
        let record = serde_json::from_slice(value.value())
            .map_err(|e| AlertError::QueryFailed(format!("deserialize: {e}")))?;
        Ok(Some(record))
    }
}

impl AlertStore for RedbAlertStore {
    fn insert_alert(&self, alert: NewAlert) -> Result<AlertRecord, AlertError> {
        let _lock = self
            .write_lock
            .lock()
            .map_err(|e| AlertError::StoreFailed(format!("lock poisoned: {e}")))?;

        let record = AlertRecord::new(self.next_id(), alert);
        let value = serde_json::to_vec(&record)
            .map_err(|e| AlertError::StoreFailed(format!("serialize: {e}")))?;

        let txn = self
            .db
            .begin_write()
            .map_err(|e| AlertError::StoreFailed(format!("redb write txn: {e}")))?;
        {
            let mut table = txn
                .open_table(ALERT_TABLE)
                .map_err(|e| AlertError::StoreFailed(format!("redb write table: {e}")))?;
            table
                .insert(record.id.as_str(), value.as_slice())
                .map_err(|e| AlertError::StoreFailed(format!("redb insert: {e}")))?;
        }
        txn.commit()
            .map_err(|e| AlertError::StoreFailed(format!("redb write commit: {e}")))?;

        Ok(record)
    }

    fn get_alert(&self, id: &str) -> Result<Option<AlertRecord>, AlertError> {
        self.read_record(id)
    }

    fn claim_for_dispatch(&self, id: &str) -> Result<ClaimOutcome, AlertError> {
        let _lock = self
            .write_lock
            .lock()
            .map_err(|e| AlertError::StoreFailed(format!("lock poisoned: {e}")))?;

        let txn = self
            .db
            .begin_write()
            .map_err(|e| AlertError::StoreFailed(format!("redb claim txn: {e}")))?;
        let outcome = {
            let mut table = txn
                .open_table(ALERT_TABLE)
                .map_err(|e| AlertError::StoreFailed(format!("redb claim table: {e}")))?;

            let existing = table
                .get(id)
                .map_err(|e| AlertError::StoreFailed(format!("redb claim get: {e}")))?
                .map(|value| serde_json::from_slice::<AlertRecord>(value.value()))
                .transpose()
                .map_err(|e| AlertError::StoreFailed(format!("deserialize: {e}")))?;

            match existing {
                None => ClaimOutcome::NotFound,
                Some(record) if record.sent || record.claimed => ClaimOutcome::AlreadyTaken,
                Some(mut record) => {
                    record.claimed = true;
                    let value = serde_json::to_vec(&record)
                        .map_err(|e| AlertError::StoreFailed(format!("serialize: {e}")))?;
                    table
                        .insert(id, value.as_slice())
                        .map_err(|e| AlertError::StoreFailed(format!("redb claim insert: {e}")))?;
                    ClaimOutcome::Claimed(record)
                }
            }
        };
        txn.commit()
            .map_err(|e| AlertError::StoreFailed(format!("redb claim commit: {e}")))?;

        Ok(outcome)
    }

    fn commit_delivery(
        &self,
        id: &str,
        results: &[DeliveryResult],
    ) -> Result<AlertRecord, AlertError> {
        let _lock = self
            .write_lock
            .lock()
            .map_err(|e| AlertError::StoreFailed(format!("lock poisoned: {e}")))?;

        let txn = self
            .db
            .begin_write()
            .map_err(|e| AlertError::StoreFailed(format!("redb commit txn: {e}")))?;
        let updated = {
            let mut table = txn
                .open_table(ALERT_TABLE)
                .map_err(|e| AlertError::StoreFailed(format!("redb commit table: {e}")))?;

            let mut record = table
                .get(id)
                .map_err(|e| AlertError::StoreFailed(format!("redb commit get: {e}")))?
                .map(|value| serde_json::from_slice::<AlertRecord>(value.value()))
                .transpose()
                .map_err(|e| AlertError::StoreFailed(format!("deserialize: {e}")))?
                .ok_or_else(|| AlertError::NotFound(id.to_string()))?;

            record.sent = true;
            record.sent_timestamp_ms = Some(now_ms());
            record.delivery_results = results.to_vec();

            let value = serde_json::to_vec(&record)
                .map_err(|e| AlertError::StoreFailed(format!("serialize: {e}")))?;
            table
                .insert(id, value.as_slice())
                .map_err(|e| AlertError::StoreFailed(format!("redb commit insert: {e}")))?;
            record
        };
        txn.commit()
            .map_err(|e| AlertError::StoreFailed(format!("redb commit: {e}")))?;

        Ok(updated)
    }

    fn alert_count(&self) -> Result<usize, AlertError> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| AlertError::QueryFailed(format!("redb count txn: {e}")))?;
        let table = txn
            .open_table(ALERT_TABLE)
            .map_err(|e| AlertError::QueryFailed(format!("redb count table: {e}")))?;
        let len = table
            .len()
            .map_err(|e| AlertError::QueryFailed(format!("redb count: {e}")))?;
        Ok(len as usize)
    }
}
