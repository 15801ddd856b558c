//! Best-effort persistence of the selection and the last shown gradient.
//!
//! Storage is a plain string key-value store. Every key this crate writes is
//! prefixed with a namespace so the backing store can be shared. Failures
//! are logged and swallowed: the session keeps working in memory.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::gradient::Gradient;
use crate::selection::ColorId;

/// Default key namespace.
pub const DEFAULT_NAMESPACE: &str = "chromatix";

const SELECTION_KEY: &str = "selection-list";
const GRADIENT_KEY: &str = "last-gradient";

/// Error type for storage backends.
#[derive(Debug)]
pub enum StorageError {
    /// IO error reading/writing the backing file
    Io(std::io::Error),
    /// State could not be encoded as JSON
    Json(serde_json::Error),
    /// Storage medium cannot be used at all
    Unavailable,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Unavailable => write!(f, "storage unavailable"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// In-memory store. [`MemoryStore::unavailable`] builds one that fails every
/// operation.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            entries: BTreeMap::new(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.check()?;
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Store backed by a single JSON object file.
///
/// Each operation reads the file, applies the change and writes it back, so
/// external edits and keys owned by other programs are preserved whatever
/// their value type. A file that is not a JSON object reads as empty and is
/// moved to [`FileStore::backup_path`] on the next write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unparseable state file is moved before it is overwritten.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn read_all(&self) -> Result<Entries, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::default()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Entries::default());
        }
        match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(map) => Ok(Entries {
                map,
                unreadable: false,
            }),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "state file is not a JSON object, treating it as empty"
                );
                Ok(Entries {
                    map: Map::new(),
                    unreadable: true,
                })
            }
        }
    }

    fn write_all(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        if entries.unreadable {
            let backup = self.backup_path();
            std::fs::rename(&self.path, &backup)?;
            tracing::info!(backup = %backup.display(), "moved unreadable state file aside");
        }
        let json = serde_json::to_string_pretty(&entries.map)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Parsed state file. Values owned by other programs may be any JSON.
#[derive(Debug, Default)]
struct Entries {
    map: Map<String, Value>,
    unreadable: bool,
}

impl KeyValueStore for FileStore {
    /// Non-string values belong to other programs and read as absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.read_all()?;
        Ok(entries
            .map
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries
            .map
            .insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.map.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.read_all()?.map.keys().cloned().collect())
    }
}

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedSnapshot {
    pub selection: Vec<ColorId>,
    pub last_gradient: Option<Gradient>,
}

/// Namespaced, best-effort persistence of the session state.
#[derive(Debug)]
pub struct PersistenceStore<S> {
    store: S,
    namespace: String,
    degraded: bool,
}

impl<S: KeyValueStore> PersistenceStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_namespace(store, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(store: S, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            degraded: false,
        }
    }

    /// Whether a storage operation has failed this session.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Backing store, for inspection.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn key(&self, name: &str) -> String {
        format!("{}.{}", self.namespace, name)
    }

    fn owns(&self, key: &str) -> bool {
        key.strip_prefix(self.namespace.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
    }

    fn write(&mut self, name: &str, value: &str) {
        let key = self.key(name);
        if let Err(e) = self.store.set(&key, value) {
            self.degraded = true;
            tracing::warn!(key = %key, error = %e, "failed to persist state, continuing in memory");
        }
    }

    fn read(&self, name: &str) -> Option<String> {
        let key = self.key(name);
        match self.store.get(&key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read persisted state");
                None
            }
        }
    }

    pub fn save_selection(&mut self, selection: &[ColorId]) {
        match serde_json::to_string(selection) {
            Ok(json) => self.write(SELECTION_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "failed to serialize selection"),
        }
    }

    /// Persisted selection; empty when absent or malformed.
    pub fn load_selection(&self) -> Vec<ColorId> {
        let Some(raw) = self.read(SELECTION_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring malformed persisted selection");
            Vec::new()
        })
    }

    pub fn save_gradient(&mut self, gradient: &Gradient) {
        self.write(GRADIENT_KEY, gradient.as_str());
    }

    pub fn load_gradient(&self) -> Option<Gradient> {
        self.read(GRADIENT_KEY)
            .map(Gradient::new)
            .filter(|g| !g.is_empty())
    }

    pub fn load_snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            selection: self.load_selection(),
            last_gradient: self.load_gradient(),
        }
    }

    /// Remove every key in this store's namespace, leaving other keys alone.
    pub fn clear_all(&mut self) {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                self.degraded = true;
                tracing::warn!(error = %e, "failed to list persisted keys");
                return;
            }
        };

        let owned: Vec<String> = keys.into_iter().filter(|k| self.owns(k)).collect();
        for key in owned {
            if let Err(e) = self.store.remove(&key) {
                self.degraded = true;
                tracing::warn!(key = %key, error = %e, "failed to remove persisted key");
            }
        }
    }
}
