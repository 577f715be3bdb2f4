use crate::errors::AppError;
use crate::models::{is_valid_score, PainRecord};
use std::{collections::HashSet, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

/// Name the browser build used as its local-storage key; doubles as the file stem.
pub const STORAGE_KEY: &str = "vas_pain_tracker_data";

pub fn default_data_path() -> PathBuf {
    PathBuf::from("data").join(format!("{STORAGE_KEY}.json"))
}

/// Reads the whole collection. Never fails: a missing file is an empty
/// collection, an unreadable or invalid one is logged and dropped.
pub async fn load_records(path: &Path) -> Vec<PainRecord> {
    match fs::read(path).await {
        Ok(bytes) => decode_records(&bytes).unwrap_or_else(|reason| {
            error!(path = %path.display(), "discarding stored records: {reason}");
            Vec::new()
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            error!(path = %path.display(), "failed to read records: {err}");
            Vec::new()
        }
    }
}

/// Replaces the stored collection with `records`.
pub async fn persist_records(path: &Path, records: &[PainRecord]) -> Result<(), AppError> {
    let payload = encode_records(records)?;
    fs::write(path, payload).await?;
    Ok(())
}

pub fn encode_records(records: &[PainRecord]) -> Result<Vec<u8>, AppError> {
    // Same compact layout the browser wrote under STORAGE_KEY.
    Ok(serde_json::to_vec(records)?)
}

pub fn decode_records(bytes: &[u8]) -> Result<Vec<PainRecord>, String> {
    let records: Vec<PainRecord> = serde_json::from_slice(bytes).map_err(|err| err.to_string())?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if record.id.is_empty() {
            return Err("record with empty id".to_string());
        }
        if !is_valid_score(record.score) {
            return Err(format!("record {} has score {}", record.id, record.score));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(format!("duplicate record id {}", record.id));
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, timestamp: i64, score: u8, note: &str) -> PainRecord {
        PainRecord {
            id: id.to_string(),
            timestamp,
            score,
            note: note.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_records(&dir.path().join("absent.json")).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, b"{not json").await.unwrap();
        assert!(load_records(&path).await.is_empty());

        fs::write(&path, br#"[{"id":"a","timestamp":1,"note":""}]"#)
            .await
            .unwrap();
        assert!(load_records(&path).await.is_empty());
    }

    #[tokio::test]
    async fn invalid_records_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        fs::write(&path, br#"[{"id":"a","timestamp":1,"score":11,"note":""}]"#)
            .await
            .unwrap();
        assert!(load_records(&path).await.is_empty());

        fs::write(
            &path,
            br#"[{"id":"a","timestamp":2,"score":3,"note":""},{"id":"a","timestamp":1,"score":4,"note":""}]"#,
        )
        .await
        .unwrap();
        assert!(load_records(&path).await.is_empty());
    }

    #[tokio::test]
    async fn unknown_fields_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            br#"[{"id":"a","timestamp":5,"score":2,"note":"x","mood":"ok"}]"#,
        )
        .await
        .unwrap();

        let records = load_records(&path).await;
        assert_eq!(records, vec![record("a", 5, 2, "x")]);
    }

    #[tokio::test]
    async fn save_of_loaded_collection_is_byte_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let stored = br#"[{"id":"b","timestamp":20,"score":8,"note":"after medication"},{"id":"a","timestamp":10,"score":4,"note":""}]"#;
        fs::write(&path, stored).await.unwrap();

        let records = load_records(&path).await;
        assert_eq!(records.len(), 2);
        persist_records(&path, &records).await.unwrap();

        let rewritten = fs::read(&path).await.unwrap();
        assert_eq!(rewritten, stored.to_vec());
    }

    #[test]
    fn default_path_uses_storage_key() {
        assert_eq!(
            default_data_path(),
            PathBuf::from("data/vas_pain_tracker_data.json")
        );
    }
}
