//! Folder collection state and its mutation contract.
//!
//! # Responsibility
//! - Hold the ordered folder collection (built-ins first, user folders
//!   appended).
//! - Create user folders with palette metadata and guard built-ins on delete.
//!
//! # Invariants
//! - Deleting a protected id is a no-op and never invokes the reassignment
//!   callback.
//! - The reassignment callback runs before the folder leaves the collection.
//! - Loading a collection that lacks built-ins re-seeds the missing ones at
//!   the front, in default order.
//! - Persistence follows the same log-and-continue policy as tasks.

use crate::model::folder::{default_folders, is_protected_folder, Folder, FolderId};
use crate::storage::{read_json, write_json, KeyValueStorage, FOLDERS_KEY};
use log::{debug, info, warn};
use rand::Rng;

/// Closed set of folder mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderAction {
    Add(Folder),
    Delete(FolderId),
    Load(Vec<Folder>),
}

/// Applies `action` to `folders` in place.
///
/// Returns `true` when the collection changed. Deleting a protected id never
/// changes it.
pub fn reduce_folders(folders: &mut Vec<Folder>, action: FolderAction) -> bool {
    match action {
        FolderAction::Add(folder) => {
            folders.push(folder);
            true
        }
        FolderAction::Delete(id) => {
            if is_protected_folder(&id) {
                return false;
            }
            let before = folders.len();
            folders.retain(|folder| folder.id != id);
            folders.len() != before
        }
        FolderAction::Load(records) => {
            *folders = with_builtins(records);
            true
        }
    }
}

fn with_builtins(records: Vec<Folder>) -> Vec<Folder> {
    let mut missing: Vec<Folder> = default_folders()
        .into_iter()
        .filter(|builtin| !records.iter().any(|folder| folder.id == builtin.id))
        .collect();
    missing.extend(records);
    missing
}

/// Folder state container persisting through a key-value storage.
pub struct FolderStore<S: KeyValueStorage> {
    storage: S,
    folders: Vec<Folder>,
    hydrated: bool,
}

impl<S: KeyValueStorage> FolderStore<S> {
    /// Creates a store seeded with the built-in folders.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            folders: default_folders(),
            hydrated: false,
        }
    }

    /// Loads the persisted collection, once per store.
    ///
    /// Failures are logged and keep the current (default) folders.
    pub fn hydrate(&mut self) -> usize {
        if self.hydrated {
            debug!("event=folders_hydrate module=store status=skipped reason=already_hydrated");
            return self.folders.len();
        }
        self.hydrated = true;

        match read_json::<Vec<Folder>, _>(&self.storage, FOLDERS_KEY) {
            Ok(Some(records)) => {
                self.dispatch(FolderAction::Load(records));
                info!(
                    "event=folders_hydrate module=store status=ok count={}",
                    self.folders.len()
                );
            }
            Ok(None) => {
                info!(
                    "event=folders_hydrate module=store status=ok count={} stored=false",
                    self.folders.len()
                );
            }
            Err(err) => {
                warn!(
                    "event=folders_hydrate module=store status=error error_code=folders_load_failed error={}",
                    err
                );
            }
        }
        self.folders.len()
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Finds a folder by id.
    pub fn get_by_id(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_by_id(id).is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends a user folder with random palette picks and returns its id.
    pub fn add(&mut self, name: impl Into<String>) -> FolderId {
        self.add_with_rng(name, &mut rand::rng())
    }

    /// Same as [`FolderStore::add`] with an explicit random source.
    pub fn add_with_rng<R: Rng + ?Sized>(
        &mut self,
        name: impl Into<String>,
        rng: &mut R,
    ) -> FolderId {
        let folder = Folder::user_created(name, rng);
        let id = folder.id.clone();
        self.dispatch(FolderAction::Add(folder));
        id
    }

    /// Deletes a non-protected folder without reassigning anything.
    pub fn delete(&mut self, id: &str) -> bool {
        self.delete_with(id, |_| {})
    }

    /// Deletes a non-protected folder, letting `on_reassign_needed` migrate
    /// dependent tasks first.
    ///
    /// The callback receives the folder id and is skipped for protected ids.
    pub fn delete_with(&mut self, id: &str, on_reassign_needed: impl FnOnce(&str)) -> bool {
        if is_protected_folder(id) {
            debug!("event=folder_delete module=store status=noop reason=protected folder_id={id}");
            return false;
        }
        on_reassign_needed(id);
        self.dispatch(FolderAction::Delete(id.to_string()))
    }

    /// Replaces the whole collection.
    pub fn load(&mut self, records: Vec<Folder>) {
        self.dispatch(FolderAction::Load(records));
    }

    /// Reduces `action` into the collection, then persists it.
    pub fn dispatch(&mut self, action: FolderAction) -> bool {
        let changed = reduce_folders(&mut self.folders, action);
        self.persist();
        changed
    }

    /// Writes the full collection under the `folders` key.
    pub fn persist(&self) {
        if let Err(err) = write_json(&self.storage, FOLDERS_KEY, &self.folders) {
            warn!(
                "event=folders_persist module=store status=error error_code=folders_save_failed count={} error={}",
                self.folders.len(),
                err
            );
        }
    }
}
