//! Per-session context owning all mutable coordinator state.

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::persistence::{FileStore, KeyValueStore, PersistenceStore};
use crate::rotation::{RotationController, RotationPolicy};
use crate::selection::SelectionRegistry;

/// Selection, rotation, persistence and metadata for one session.
///
/// A fresh `Session` per run (or per test) replaces any global state; the
/// binder reads from it and mutates it only through the component methods.
#[derive(Debug)]
pub struct Session<K> {
    pub selection: SelectionRegistry,
    pub rotation: RotationController,
    pub persistence: PersistenceStore<K>,
    pub catalog: Option<Catalog>,
}

impl<K: KeyValueStore> Session<K> {
    pub fn new(persistence: PersistenceStore<K>, policy: RotationPolicy) -> Self {
        Self {
            selection: SelectionRegistry::new(),
            rotation: RotationController::new(policy),
            persistence,
            catalog: None,
        }
    }

    pub fn with_catalog(mut self, catalog: Option<Catalog>) -> Self {
        self.catalog = catalog;
        self
    }
}

impl Session<FileStore> {
    /// File-backed session described by `config`.
    ///
    /// Without a catalog path the built-in metadata is used; an unreadable
    /// catalog file leaves the session without metadata.
    pub fn open(config: &AppConfig) -> Self {
        let store = FileStore::new(&config.storage.path);
        let persistence = PersistenceStore::with_namespace(store, &config.storage.namespace);
        let catalog = match &config.catalog.path {
            Some(path) => Catalog::load_optional(path),
            None => Some(Catalog::builtin()),
        };
        Self::new(persistence, config.rotation_policy()).with_catalog(catalog)
    }
}
