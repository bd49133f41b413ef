//! Repository Implementation

use crate::label::Label;
use crate::record::PredictionRecord;
use crate::StorageError;
use feature_engine::FeatureVector;
use std::cmp::Reverse;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

/// Live-updating collection of prediction records.
///
/// Subscribers receive a full snapshot, newest first, after every change.
/// Both mutations are keyed by record id and safe to repeat.
pub trait RecordStore: Send + Sync {
    /// Current records, newest first
    fn snapshot(&self) -> Result<Vec<PredictionRecord>, StorageError>;

    /// Stream of full snapshots; the receiver starts at the current one
    fn subscribe(&self) -> watch::Receiver<Vec<PredictionRecord>>;

    /// Set the ground-truth label of a record
    fn update_actual_label(&self, id: &str, label: Label) -> Result<(), StorageError>;

    /// Remove a record; removing a missing id is not an error
    fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// In-memory record store
pub struct Repository {
    /// Records in insertion order
    records: Mutex<Vec<PredictionRecord>>,
    /// Snapshot publisher
    updates: watch::Sender<Vec<PredictionRecord>>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        info!("Creating in-memory record repository");
        Self::with_records(Vec::new())
    }

    /// Create a repository seeded with existing records
    pub fn with_records(records: Vec<PredictionRecord>) -> Self {
        let (updates, _) = watch::channel(newest_first(&records));
        Self {
            records: Mutex::new(records),
            updates,
        }
    }

    /// Store a fresh prediction and return its id
    pub fn insert(
        &self,
        input_data: FeatureVector,
        predicted_label: Label,
    ) -> Result<String, StorageError> {
        let id = Uuid::new_v4().simple().to_string();
        let mut records = self.lock()?;
        records.push(PredictionRecord::predicted(id.clone(), input_data, predicted_label));
        debug!("Inserted prediction {} (predicted {})", id, predicted_label);
        self.publish(&records);
        Ok(id)
    }

    /// Look up one record
    pub fn get(&self, id: &str) -> Result<PredictionRecord, StorageError> {
        self.lock()?
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    /// Total record count
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<PredictionRecord>>, StorageError> {
        self.records
            .lock()
            .map_err(|e| StorageError::DatabaseError(format!("Lock error: {}", e)))
    }

    fn publish(&self, records: &[PredictionRecord]) {
        self.updates.send_replace(newest_first(records));
    }
}

impl RecordStore for Repository {
    fn snapshot(&self) -> Result<Vec<PredictionRecord>, StorageError> {
        Ok(newest_first(&self.lock()?))
    }

    fn subscribe(&self) -> watch::Receiver<Vec<PredictionRecord>> {
        self.updates.subscribe()
    }

    fn update_actual_label(&self, id: &str, label: Label) -> Result<(), StorageError> {
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        record.actual_label = Some(label);
        info!("Labeled {} as {}", id, label);
        self.publish(&records);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            debug!("Delete of {} skipped: no such record", id);
            return Ok(());
        }
        info!("Deleted {}", id);
        self.publish(&records);
        Ok(())
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

/// Order by timestamp descending; records without a timestamp go last
fn newest_first(records: &[PredictionRecord]) -> Vec<PredictionRecord> {
    let mut sorted = records.to_vec();
    // Stable sort keeps insertion order among equal timestamps
    sorted.sort_by_key(|r| (r.timestamp.is_none(), Reverse(r.timestamp)));
    sorted
}
