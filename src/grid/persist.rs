//! Persistence bridge for per-table preferences.
//!
//! Column visibility, sort state and column widths are stored as three
//! independent JSON blobs under `<namespace>.<tableId>.columns`, `.sort` and
//! `.widths`. Storage is best-effort: every failure is logged and swallowed
//! so the grid keeps working from its in-memory state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Namespace used when the host does not configure one.
pub const DEFAULT_NAMESPACE: &str = "datagrid";

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is turned off or unavailable.
    #[error("storage is disabled")]
    Disabled,

    /// The platform has no data directory to store files under.
    #[error("no data directory available")]
    NoDataDir,

    /// I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stored data could not be (de)serialized.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value string storage, modelled on browser local storage.
pub trait Storage {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Clones share the same map, so a new grid built over a
/// clone sees what an earlier grid wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Storage that refuses every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStorage;

impl Storage for DisabledStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Disabled)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Disabled)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Disabled)
    }
}

/// Disk storage with one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Store files under `base_dir`. The directory is created on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Store under the platform data directory (`…/taskgrid/tables`).
    pub fn in_data_dir() -> Result<Self, StorageError> {
        let base_dir = dirs::data_local_dir()
            .ok_or(StorageError::NoDataDir)?
            .join("taskgrid")
            .join("tables");
        Ok(Self::new(base_dir))
    }

    /// The storage directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn item_path(&self, key: &str) -> PathBuf {
        let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
        self.base_dir.join(format!("{}.json", safe_key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.item_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.item_path(key);
        fs::write(&path, value)?;
        trace!("Stored {:?}", path);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The persisted slices of a table's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistedSlice {
    /// Column visibility.
    Columns,
    /// Sort state.
    Sort,
    /// Column widths.
    Widths,
}

impl PersistedSlice {
    /// All slices.
    pub const ALL: [PersistedSlice; 3] = [
        PersistedSlice::Columns,
        PersistedSlice::Sort,
        PersistedSlice::Widths,
    ];

    /// Key suffix.
    pub fn suffix(&self) -> &'static str {
        match self {
            PersistedSlice::Columns => "columns",
            PersistedSlice::Sort => "sort",
            PersistedSlice::Widths => "widths",
        }
    }
}

/// Loads and saves one table's preferences.
#[derive(Clone)]
pub struct PersistenceBridge {
    storage: Rc<dyn Storage>,
    namespace: String,
    table_id: String,
}

impl PersistenceBridge {
    /// Create a bridge for `table_id` under `namespace`.
    pub fn new(storage: Rc<dyn Storage>, namespace: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            storage,
            namespace: namespace.into(),
            table_id: table_id.into(),
        }
    }

    /// Storage key of `slice`.
    pub fn key(&self, slice: PersistedSlice) -> String {
        format!("{}.{}.{}", self.namespace, self.table_id, slice.suffix())
    }

    /// Load `slice`. Absent, unreadable or malformed data yields `None`.
    pub fn load<V: DeserializeOwned>(&self, slice: PersistedSlice) -> Option<V> {
        let key = self.key(slice);
        let raw = match self.storage.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!(key = %key, error = %e, "Failed to read table preferences");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(key = %key, error = %e, "Ignoring malformed table preferences");
                None
            }
        }
    }

    /// Save `value` as `slice`. Failures are logged and ignored.
    pub fn save<V: Serialize>(&self, slice: PersistedSlice, value: &V) {
        let key = self.key(slice);
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| self.storage.set_item(&key, &raw));
        if let Err(e) = result {
            warn!(key = %key, error = %e, "Failed to persist table preferences");
        }
    }

    /// Remove every slice of this table.
    pub fn clear(&self) {
        for slice in PersistedSlice::ALL {
            let key = self.key(slice);
            if let Err(e) = self.storage.remove_item(&key) {
                warn!(key = %key, error = %e, "Failed to clear table preferences");
            }
        }
    }
}

impl std::fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceBridge")
            .field("namespace", &self.namespace)
            .field("table_id", &self.table_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::sort::SortState;
    use tempfile::tempdir;

    fn create_test_bridge(storage: &MemoryStorage) -> PersistenceBridge {
        PersistenceBridge::new(Rc::new(storage.clone()), DEFAULT_NAMESPACE, "tasks")
    }

    #[test]
    fn test_keys_are_namespaced_per_table() {
        let storage = MemoryStorage::new();
        let bridge = create_test_bridge(&storage);
        assert_eq!(bridge.key(PersistedSlice::Columns), "datagrid.tasks.columns");
        assert_eq!(bridge.key(PersistedSlice::Sort), "datagrid.tasks.sort");
        assert_eq!(bridge.key(PersistedSlice::Widths), "datagrid.tasks.widths");
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        let bridge = create_test_bridge(&storage);
        bridge.save(PersistedSlice::Sort, &SortState::desc("title"));
        let loaded: Option<SortState> = bridge.load(PersistedSlice::Sort);
        assert_eq!(loaded, Some(SortState::desc("title")));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_ignored() {
        let storage = MemoryStorage::new();
        storage.set_item("datagrid.tasks.sort", "{not json").unwrap();
        let bridge = create_test_bridge(&storage);
        let loaded: Option<SortState> = bridge.load(PersistedSlice::Sort);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_disabled_storage_never_fails_callers() {
        let bridge = PersistenceBridge::new(Rc::new(DisabledStorage), DEFAULT_NAMESPACE, "tasks");
        bridge.save(PersistedSlice::Sort, &SortState::asc("title"));
        let loaded: Option<SortState> = bridge.load(PersistedSlice::Sort);
        assert!(loaded.is_none());
        bridge.clear();
    }

    #[test]
    fn test_tables_do_not_share_keys() {
        let storage = MemoryStorage::new();
        let tasks = PersistenceBridge::new(Rc::new(storage.clone()), DEFAULT_NAMESPACE, "tasks");
        let users = PersistenceBridge::new(Rc::new(storage.clone()), DEFAULT_NAMESPACE, "users");
        tasks.save(PersistedSlice::Sort, &SortState::asc("title"));
        let loaded: Option<SortState> = users.load(PersistedSlice::Sort);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_clear_removes_all_slices() {
        let storage = MemoryStorage::new();
        let bridge = create_test_bridge(&storage);
        bridge.save(PersistedSlice::Sort, &SortState::asc("title"));
        bridge.save(PersistedSlice::Columns, &serde_json::json!({"title": true}));
        bridge.clear();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("tables"));
        assert_eq!(storage.get_item("datagrid.tasks.sort").unwrap(), None);

        storage.set_item("datagrid.tasks.sort", "{\"column\":null}").unwrap();
        assert_eq!(
            storage.get_item("datagrid.tasks.sort").unwrap().as_deref(),
            Some("{\"column\":null}")
        );

        storage.remove_item("datagrid.tasks.sort").unwrap();
        assert_eq!(storage.get_item("datagrid.tasks.sort").unwrap(), None);
        storage.remove_item("datagrid.tasks.sort").unwrap();
    }

    #[test]
    fn test_file_storage_sanitizes_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set_item("ns.team/a:b.sort", "1").unwrap();
        assert!(dir.path().join("ns.team_a_b.sort.json").exists());
        assert_eq!(storage.get_item("ns.team/a:b.sort").unwrap().as_deref(), Some("1"));
    }
}
