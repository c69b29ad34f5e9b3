//! # Generation History
//!
//! A bounded, recency-ordered list of past generations, persisted as one
//! JSON record under [`HISTORY_KEY`].
//!
//! ## Invariants
//!
//! - At most [`MAX_HISTORY_ITEMS`] entries.
//! - No two entries share a `value`.
//! - Most recent first.
//!
//! ## Recording
//!
//! ```text
//! [c, b, a]  record(b)  →  [b', c, a]     (old b dropped, b' at the front)
//! [t..a] (20) record(u) →  [u, t..b]      (oldest dropped)
//! ```
//!
//! Persistence is best effort: a failed write is logged and the in-memory
//! list stays authoritative for the session.
//!
//! ## Example
//!
//! ```
//! use qrforge::caption::CaptionStyle;
//! use qrforge::history::{HistoryStore, MemoryStore};
//!
//! let mut history = HistoryStore::initialize(MemoryStore::new());
//! history.record("https://example.com", "minimal", CaptionStyle::default());
//! history.record("hello", "dark", CaptionStyle::default());
//! history.record("https://example.com", "pastel", CaptionStyle::default());
//!
//! let values: Vec<_> = history.entries().iter().map(|e| e.value.as_str()).collect();
//! assert_eq!(values, ["https://example.com", "hello"]);
//! ```

mod age;
pub mod store;

pub use age::format_age;
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::caption::CaptionStyle;

/// Storage key of the persisted history.
pub const HISTORY_KEY: &str = "qr-generator-history";

/// Maximum number of entries kept.
pub const MAX_HISTORY_ITEMS: usize = 20;

/// One past generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub value: String,
    /// May no longer resolve if the catalog changed since
    pub template_id: String,
    #[serde(rename = "textStyle")]
    pub caption: CaptionStyle,
    /// Epoch milliseconds
    pub created_at: i64,
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// The history list plus its persistence backend.
#[derive(Debug)]
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Load the persisted list. Missing, unreadable or malformed data all
    /// yield an empty history; nothing here fails.
    pub fn initialize(store: S) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<HistoryEntry>>(&json) {
                Ok(entries) => normalize(entries),
                Err(e) => {
                    tracing::warn!("Failed to parse QR history, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to load QR history, starting empty: {}", e);
                Vec::new()
            }
        };

        tracing::debug!(count = entries.len(), "history loaded");
        Self { store, entries }
    }

    /// Record a generation now. See [`record_at`](Self::record_at).
    pub fn record(&mut self, value: &str, template_id: &str, caption: CaptionStyle) -> HistoryEntry {
        self.record_at(value, template_id, caption, now_millis())
    }

    /// Record a generation with an explicit timestamp.
    ///
    /// Drops any entry with the same `value`, prepends the new one,
    /// truncates to [`MAX_HISTORY_ITEMS`] and persists.
    pub fn record_at(
        &mut self,
        value: &str,
        template_id: &str,
        caption: CaptionStyle,
        created_at: i64,
    ) -> HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            value: value.to_string(),
            template_id: template_id.to_string(),
            caption,
            created_at,
        };

        let mut updated = Vec::with_capacity(MAX_HISTORY_ITEMS);
        updated.push(entry.clone());
        updated.extend(
            self.entries
                .iter()
                .filter(|e| e.value != value)
                .take(MAX_HISTORY_ITEMS - 1)
                .cloned(),
        );
        self.entries = updated;

        self.persist("save");
        entry
    }

    /// Remove the entry with `id`. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<HistoryEntry> {
        let index = self.entries.iter().position(|e| e.id == id);
        let removed = index.map(|i| self.entries.remove(i));
        self.persist("update");
        removed
    }

    /// Empty the list and delete the persisted record.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            tracing::warn!("Failed to clear QR history: {}", e);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, action: &str) {
        let result = serde_json::to_string(&self.entries)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(HISTORY_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to {} QR history: {}", action, e);
        }
    }
}

/// Re-establish the invariants on a loaded list: first occurrence of each
/// value wins, then truncate.
fn normalize(entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.value.clone()))
        .take(MAX_HISTORY_ITEMS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Store whose writes always fail.
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("storage disabled".into()))
        }
    }

    fn values<S: KeyValueStore>(history: &HistoryStore<S>) -> Vec<&str> {
        history.entries().iter().map(|e| e.value.as_str()).collect()
    }

    #[test]
    fn test_record_prepends() {
        let mut history = HistoryStore::initialize(MemoryStore::new());
        history.record("a", "minimal", CaptionStyle::default());
        history.record("b", "minimal", CaptionStyle::default());
        assert_eq!(values(&history), vec!["b", "a"]);
    }

    #[test]
    fn test_record_dedups_on_value() {
        let mut history = HistoryStore::initialize(MemoryStore::new());
        let first = history.record_at("a", "minimal", CaptionStyle::default(), 1);
        history.record_at("b", "minimal", CaptionStyle::default(), 2);
        let again = history.record_at("a", "dark", CaptionStyle::new("Scan Me"), 3);

        assert_eq!(values(&history), vec!["a", "b"]);
        assert_ne!(first.id, again.id);
        assert_eq!(history.entries()[0], again);
        assert_eq!(history.entries()[0].template_id, "dark");
        assert_eq!(history.entries()[0].created_at, 3);
    }

    #[test]
    fn test_record_caps_length() {
        let mut history = HistoryStore::initialize(MemoryStore::new());
        for i in 0..(MAX_HISTORY_ITEMS + 5) {
            history.record(&format!("v{}", i), "minimal", CaptionStyle::default());
            assert!(history.len() <= MAX_HISTORY_ITEMS);
        }
        assert_eq!(history.len(), MAX_HISTORY_ITEMS);
        assert_eq!(history.entries()[0].value, "v24");
        assert_eq!(history.entries()[MAX_HISTORY_ITEMS - 1].value, "v5");
    }

    #[test]
    fn test_record_duplicate_at_cap_keeps_others() {
        let mut history = HistoryStore::initialize(MemoryStore::new());
        for i in 0..MAX_HISTORY_ITEMS {
            history.record(&format!("v{}", i), "minimal", CaptionStyle::default());
        }
        // Re-recording the oldest value must not evict anything else
        history.record("v0", "minimal", CaptionStyle::default());
        assert_eq!(history.len(), MAX_HISTORY_ITEMS);
        assert_eq!(history.entries()[0].value, "v0");
        assert_eq!(history.entries()[MAX_HISTORY_ITEMS - 1].value, "v1");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut history = HistoryStore::initialize(MemoryStore::new());
        history.record("a", "minimal", CaptionStyle::default());
        let before = history.entries().to_vec();
        assert!(history.remove("missing").is_none());
        assert_eq!(history.entries(), before.as_slice());
    }

    #[test]
    fn test_remove_persists() {
        let mut history = HistoryStore::initialize(MemoryStore::new());
        let a = history.record("a", "minimal", CaptionStyle::default());
        history.record("b", "minimal", CaptionStyle::default());
        assert_eq!(history.remove(&a.id).map(|e| e.value), Some("a".to_string()));

        let reloaded = HistoryStore::initialize(history.store().clone());
        assert_eq!(reloaded.entries(), history.entries());
        assert_eq!(values(&reloaded), vec!["b"]);
    }

    #[test]
    fn test_clear_deletes_key() {
        let mut history = HistoryStore::initialize(MemoryStore::new());
        history.record("a", "minimal", CaptionStyle::default());
        assert!(history.store().contains_key(HISTORY_KEY));
        history.clear();
        assert!(history.is_empty());
        assert!(!history.store().contains_key(HISTORY_KEY));
    }

    #[test]
    fn test_malformed_json_starts_empty() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").unwrap();
        let history = HistoryStore::initialize(store);
        assert!(history.is_empty());
    }

    #[test]
    fn test_failed_writes_keep_memory_state() {
        let mut history = HistoryStore::initialize(ReadOnlyStore::default());
        let entry = history.record("a", "minimal", CaptionStyle::default());
        assert_eq!(history.entries(), &[entry]);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_initialize_normalizes_loaded_list() {
        let entry = |id: &str, value: &str| HistoryEntry {
            id: id.to_string(),
            value: value.to_string(),
            template_id: "minimal".to_string(),
            caption: CaptionStyle::default(),
            created_at: 0,
        };
        let mut list = vec![entry("1", "a"), entry("2", "b"), entry("3", "a")];
        for i in 0..30 {
            list.push(entry(&format!("x{}", i), &format!("x{}", i)));
        }
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, &serde_json::to_string(&list).unwrap()).unwrap();

        let history = HistoryStore::initialize(store);
        assert_eq!(history.len(), MAX_HISTORY_ITEMS);
        assert_eq!(history.entries()[0].id, "1");
        assert_eq!(history.entries()[1].id, "2");
        assert_eq!(history.entries()[2].id, "x0");
    }

    #[test]
    fn test_wire_format_matches_persisted_shape() {
        let entry = HistoryEntry {
            id: "1700000000000-abc123def".to_string(),
            value: "https://example.com".to_string(),
            template_id: "dark".to_string(),
            caption: CaptionStyle::new("Scan Me"),
            created_at: 1700000000000,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["templateId"], "dark");
        assert_eq!(json["createdAt"], 1700000000000i64);
        assert_eq!(json["textStyle"]["text"], "Scan Me");
        assert_eq!(json["textStyle"]["fontFamily"], "DM Sans");
    }
}
