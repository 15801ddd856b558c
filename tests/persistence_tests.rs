use chromatix::gradient::Gradient;
use chromatix::persistence::{
    FileStore, KeyValueStore, MemoryStore, PersistedSnapshot, PersistenceStore,
};
use chromatix::selection::ColorId;

fn ids(raw: &[&str]) -> Vec<ColorId> {
    raw.iter().map(|s| ColorId::from(*s)).collect()
}

#[test]
fn test_selection_round_trip_preserves_order() {
    let mut store = PersistenceStore::new(MemoryStore::new());
    let list = ids(&["coral-reef", "pastel-blue", "mint-green"]);

    store.save_selection(&list);
    assert_eq!(store.load_selection(), list);
    assert!(!store.is_degraded());
}

#[test]
fn test_missing_selection_loads_empty() {
    let store = PersistenceStore::new(MemoryStore::new());
    assert!(store.load_selection().is_empty());
    assert_eq!(store.load_snapshot(), PersistedSnapshot::default());
}

#[test]
fn test_corrupted_selection_loads_empty() {
    let mut backing = MemoryStore::new();
    backing
        .set("chromatix.selection-list", "{not json")
        .unwrap();
    let store = PersistenceStore::new(backing);

    assert!(store.load_selection().is_empty());
}

#[test]
fn test_keys_are_namespaced() {
    let mut store = PersistenceStore::with_namespace(MemoryStore::new(), "shop");
    store.save_selection(&ids(&["a"]));
    store.save_gradient(&Gradient::new("#ff0000"));

    let keys = store.store().keys().unwrap();
    assert_eq!(keys, vec!["shop.last-gradient", "shop.selection-list"]);
    assert_eq!(
        store.store().get("shop.selection-list").unwrap().as_deref(),
        Some(r#"["a"]"#)
    );
}

#[test]
fn test_gradient_round_trip() {
    let mut store = PersistenceStore::new(MemoryStore::new());
    let gradient = Gradient::new("linear-gradient(135deg, #a1c4fd, #c2e9fb)");

    store.save_gradient(&gradient);
    assert_eq!(store.load_gradient(), Some(gradient));
}

#[test]
fn test_empty_gradient_is_absent() {
    let mut store = PersistenceStore::new(MemoryStore::new());
    store.save_gradient(&Gradient::new("  "));
    assert_eq!(store.load_gradient(), None);
}

#[test]
fn test_clear_all_leaves_foreign_keys() {
    let mut backing = MemoryStore::new();
    backing.set("theme", "dark").unwrap();
    backing.set("chromatix-other.key", "kept").unwrap();
    backing.set("other.selection-list", "[]").unwrap();

    let mut store = PersistenceStore::new(backing);
    store.save_selection(&ids(&["a", "b"]));
    store.save_gradient(&Gradient::new("#00ff00"));

    store.clear_all();

    assert!(store.load_selection().is_empty());
    assert_eq!(store.load_gradient(), None);
    let keys = store.store().keys().unwrap();
    assert_eq!(
        keys,
        vec!["chromatix-other.key", "other.selection-list", "theme"]
    );
}

#[test]
fn test_unavailable_storage_is_swallowed() {
    let mut store = PersistenceStore::new(MemoryStore::unavailable());

    store.save_selection(&ids(&["a"]));
    store.save_gradient(&Gradient::new("#ff0000"));
    store.clear_all();

    assert!(store.is_degraded());
    assert!(store.load_selection().is_empty());
    assert_eq!(store.load_gradient(), None);
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let mut store = PersistenceStore::new(FileStore::new(&path));
    store.save_selection(&ids(&["x", "y"]));
    store.save_gradient(&Gradient::new("#123456"));

    // A new store over the same file sees the saved state.
    let reopened = PersistenceStore::new(FileStore::new(&path));
    assert_eq!(
        reopened.load_snapshot(),
        PersistedSnapshot {
            selection: ids(&["x", "y"]),
            last_gradient: Some(Gradient::new("#123456")),
        }
    );
}

#[test]
fn test_file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent.json"));

    assert_eq!(store.get("anything").unwrap(), None);
    assert!(store.keys().unwrap().is_empty());
}

#[test]
fn test_file_store_keeps_unrelated_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"editor.font": "mono"}"#).unwrap();

    let mut store = PersistenceStore::new(FileStore::new(&path));
    store.save_selection(&ids(&["a"]));
    store.clear_all();

    let content = std::fs::read_to_string(&path).unwrap();
    let map: std::collections::BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("editor.font").map(String::as_str), Some("mono"));
}

#[test]
fn test_file_store_carries_foreign_values_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"editor.size": 12, "editor.tabs": [2, 4]}"#).unwrap();

    let mut store = PersistenceStore::new(FileStore::new(&path));
    assert_eq!(store.store().path(), path.as_path());
    store.save_selection(&ids(&["a"]));

    assert!(!store.is_degraded());
    assert_eq!(store.load_selection(), ids(&["a"]));

    let content = std::fs::read_to_string(&path).unwrap();
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(map["editor.size"], serde_json::json!(12));
    assert_eq!(map["editor.tabs"], serde_json::json!([2, 4]));
    assert_eq!(
        map["chromatix.selection-list"],
        serde_json::json!(r#"["a"]"#)
    );
}

#[test]
fn test_file_store_foreign_non_string_reads_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"chromatix.last-gradient": 7}"#).unwrap();

    let store = PersistenceStore::new(FileStore::new(&path));
    assert_eq!(store.load_gradient(), None);
    assert!(!store.is_degraded());
}

#[test]
fn test_file_store_recovers_from_corrupted_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json at all").unwrap();

    let mut store = PersistenceStore::new(FileStore::new(&path));
    assert!(store.load_selection().is_empty());

    store.save_selection(&ids(&["a", "b"]));
    store.save_gradient(&Gradient::new("#abcdef"));
    assert!(!store.is_degraded());
    assert_eq!(store.load_selection(), ids(&["a", "b"]));

    let backup = store.store().backup_path();
    assert_eq!(backup, dir.path().join("state.json.bak"));
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), "not json at all");

    store.clear_all();
    assert!(!store.is_degraded());
    assert_eq!(store.load_snapshot(), PersistedSnapshot::default());
}

#[test]
fn test_corrupted_file_can_be_cleared() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let mut store = PersistenceStore::new(FileStore::new(&path));
    store.clear_all();

    assert!(!store.is_degraded());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1, 2");
}
