//! Key-value slot bridging the submission and report views.
//!
//! The report crosses a navigation boundary as a JSON string in a named
//! slot. The core depends only on the `get`/`set` capability; expiry and
//! cleanup belong to whatever owns the backing storage.

use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use anyhow::{Context, Result};
use shared::domain::AnalysisResult;

/// Slot name under which the serialized report is handed off.
pub const ANALYSIS_RESULT_KEY: &str = "analysisResult";

pub trait ResultStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Serializes and stores one report. Written once per successful submission;
/// the stored text round-trips exactly through [`serde_json`].
pub fn persist_analysis_result(store: &dyn ResultStore, result: &AnalysisResult) -> Result<()> {
    let serialized =
        serde_json::to_string(result).context("failed to serialize analysis result")?;
    store.set(ANALYSIS_RESULT_KEY, &serialized)
}

/// In-process store, used by tests and headless hosts.
#[derive(Default)]
pub struct MemoryResultStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResultStore for MemoryResultStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per slot under a data directory, so the stored report survives
/// the view teardown between submission and report.
pub struct JsonFileResultStore {
    dir: PathBuf,
}

impl JsonFileResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ResultStore for JsonFileResultStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read result slot '{key}'"))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create result store dir '{}'", self.dir.display())
        })?;
        fs::write(self.slot_path(key), value)
            .with_context(|| format!("failed to write result slot '{key}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_returns_what_was_set() {
        let store = MemoryResultStore::new();
        assert_eq!(store.get("missing").expect("get"), None);
        store.set("slot", "value").expect("set");
        assert_eq!(store.get("slot").expect("get"), Some("value".to_string()));
    }

    #[test]
    fn file_store_round_trips_and_reports_missing_slots() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileResultStore::new(dir.path());
        assert_eq!(store.get(ANALYSIS_RESULT_KEY).expect("get"), None);
        store.set(ANALYSIS_RESULT_KEY, r#"{"ok":true}"#).expect("set");
        assert_eq!(
            store.get(ANALYSIS_RESULT_KEY).expect("get"),
            Some(r#"{"ok":true}"#.to_string())
        );
    }

    #[test]
    fn file_store_slot_survives_a_new_store_instance() {
        let dir = tempfile::tempdir().expect("tempdir");
        JsonFileResultStore::new(dir.path())
            .set(ANALYSIS_RESULT_KEY, "persisted")
            .expect("set");

        let reopened = JsonFileResultStore::new(dir.path());
        assert_eq!(
            reopened.get(ANALYSIS_RESULT_KEY).expect("get"),
            Some("persisted".to_string())
        );
    }

    #[test]
    fn last_writer_wins_on_repeated_sets() {
        let store = MemoryResultStore::new();
        store.set(ANALYSIS_RESULT_KEY, "first").expect("set");
        store.set(ANALYSIS_RESULT_KEY, "second").expect("set");
        assert_eq!(
            store.get(ANALYSIS_RESULT_KEY).expect("get"),
            Some("second".to_string())
        );
    }
}
