use rand::rngs::StdRng;
use rand::SeedableRng;
use taskbox_core::storage::read_json;
use taskbox_core::{
    default_folders, Folder, FolderStore, MemoryStorage, FOLDERS_KEY, PROTECTED_FOLDER_IDS,
};

#[test]
fn new_store_is_seeded_with_builtins() {
    let store = FolderStore::new(MemoryStorage::new());
    assert_eq!(store.folders(), default_folders().as_slice());
    assert_eq!(store.get_by_id("health").unwrap().name, "Health & Fitness");
    assert!(store.get_by_id("nope").is_none());
}

#[test]
fn add_appends_and_returns_new_id() {
    let mut store = FolderStore::new(MemoryStorage::new());
    let mut rng = StdRng::seed_from_u64(42);

    let id = store.add_with_rng("Groceries", &mut rng);

    assert_eq!(store.folders().len(), 7);
    let last = store.folders().last().unwrap();
    assert_eq!(last.id, id);
    assert_eq!(last.name, "Groceries");
}

#[test]
fn protected_folders_survive_delete() {
    let mut store = FolderStore::new(MemoryStorage::new());

    for id in PROTECTED_FOLDER_IDS {
        let mut called = false;
        assert!(!store.delete_with(id, |_| called = true));
        assert!(!called, "callback must not run for {id}");
        assert!(store.get_by_id(id).is_some());
    }
    assert_eq!(store.folders().len(), 6);
}

#[test]
fn delete_runs_callback_before_removal() {
    let mut store = FolderStore::new(MemoryStorage::new());
    let id = store.add("Temp");

    let mut seen = None;
    let removed = store.delete_with(&id, |folder_id| seen = Some(folder_id.to_string()));

    assert!(removed);
    assert_eq!(seen.as_deref(), Some(id.as_str()));
    assert!(store.get_by_id(&id).is_none());
}

#[test]
fn delete_without_callback_and_repeat_delete() {
    let mut store = FolderStore::new(MemoryStorage::new());
    let id = store.add("Scratch");

    assert!(store.delete(&id));
    assert!(!store.delete(&id));
    assert_eq!(store.folders().len(), 6);
}

#[test]
fn folders_persist_and_hydrate() {
    let storage = MemoryStorage::new();
    let mut writer = FolderStore::new(storage.clone());
    let id = writer.add("Reading list");

    let stored: Vec<Folder> = read_json(&storage, FOLDERS_KEY).unwrap().unwrap();
    assert_eq!(stored.len(), 7);

    let mut reader = FolderStore::new(storage);
    assert_eq!(reader.hydrate(), 7);
    assert_eq!(reader.get_by_id(&id), writer.get_by_id(&id));
}

#[test]
fn corrupted_folders_fall_back_to_defaults() {
    let storage = MemoryStorage::new();
    storage.insert_raw(FOLDERS_KEY, "not json");

    let mut store = FolderStore::new(storage);
    assert_eq!(store.hydrate(), 6);
    assert_eq!(store.folders(), default_folders().as_slice());
}

#[test]
fn hydrating_empty_collection_restores_builtins() {
    let storage = MemoryStorage::new();
    storage.insert_raw(FOLDERS_KEY, "[]");

    let mut store = FolderStore::new(storage.clone());
    assert_eq!(store.hydrate(), 6);
    for id in PROTECTED_FOLDER_IDS {
        assert!(store.contains(id), "missing built-in {id}");
    }

    let stored: Vec<Folder> = read_json(&storage, FOLDERS_KEY).unwrap().unwrap();
    assert_eq!(stored, default_folders());
}
