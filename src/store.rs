use crate::errors::AppError;
use crate::models::{is_valid_score, PainRecord};
use crate::storage::{load_records, persist_records};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, error, info};
use uuid::Uuid;

pub const DELETE_PROMPT: &str = "정말 이 기록을 지울까요?";

/// Session-wide owner of the record collection, kept newest-first.
///
/// Every successful mutation bumps [`RecordStore::version`], notifies
/// subscribers and, once the initial load has happened, rewrites storage.
pub struct RecordStore {
    data_path: PathBuf,
    records: Vec<PainRecord>,
    loaded: bool,
    version: u64,
    changes: watch::Sender<u64>,
}

impl RecordStore {
    /// An empty, not yet loaded store. Mutations are kept in memory only
    /// until [`RecordStore::load`] runs.
    pub fn new(data_path: PathBuf) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            data_path,
            records: Vec::new(),
            loaded: false,
            version: 0,
            changes,
        }
    }

    pub async fn open(data_path: PathBuf) -> Self {
        let mut store = Self::new(data_path);
        store.load().await;
        store
    }

    pub async fn load(&mut self) {
        self.records = load_records(&self.data_path).await;
        self.loaded = true;
        info!(
            path = %self.data_path.display(),
            count = self.records.len(),
            "records loaded"
        );
        self.bump();
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn records(&self) -> &[PainRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&PainRecord> {
        self.records.first()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Prepends a new record. Out-of-range scores are rejected before
    /// anything changes.
    pub async fn add_record(
        &mut self,
        score: u8,
        note: impl Into<String>,
    ) -> Result<PainRecord, AppError> {
        if !is_valid_score(score) {
            return Err(AppError::invalid_score(score));
        }

        // Never go below the current head so the collection stays newest-first.
        let now = Utc::now().timestamp_millis();
        let timestamp = self
            .latest()
            .map_or(now, |latest| now.max(latest.timestamp));

        let record = PainRecord {
            id: self.fresh_id(),
            timestamp,
            score,
            note: note.into(),
        };

        self.records.insert(0, record.clone());
        info!(id = %record.id, score, "record added");
        self.commit().await;

        Ok(record)
    }

    /// Removes the record with `id` if `confirm` agrees. Returns whether a
    /// record was removed; declining or an unknown id leaves everything as is.
    pub async fn delete_record<F>(&mut self, id: &str, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            debug!(id, "delete declined");
            return false;
        }

        let Some(position) = self.records.iter().position(|record| record.id == id) else {
            debug!(id, "delete of unknown record ignored");
            return false;
        };

        let removed = self.records.remove(position);
        info!(id = %removed.id, score = removed.score, "record deleted");
        self.commit().await;
        true
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.records.iter().any(|record| record.id == id) {
                return id;
            }
        }
    }

    async fn commit(&mut self) {
        if self.loaded {
            if let Err(err) = persist_records(&self.data_path, &self.records).await {
                error!(
                    path = %self.data_path.display(),
                    "failed to save records: {}",
                    err.message
                );
            }
        } else {
            debug!("store not loaded yet; skipping save");
        }
        self.bump();
    }

    fn bump(&mut self) {
        self.version += 1;
        self.changes.send_replace(self.version);
    }
}
