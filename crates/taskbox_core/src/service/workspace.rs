//! Workspace use-case service over the task and folder stores.
//!
//! # Responsibility
//! - Own one task store and one folder store sharing a storage backend.
//! - Validate user input above the store layer (blank titles and names).
//! - Keep tasks and folders consistent on folder deletion and task moves.
//!
//! # Invariants
//! - `open` hydrates both stores exactly once.
//! - Deleting a folder moves all of its tasks to the inbox before the folder
//!   leaves the collection.
//! - Strict operations report `TaskNotFound`/`FolderNotFound` instead of the
//!   stores' silent no-op.

use crate::model::folder::{is_protected_folder, Folder, FolderId, INBOX_FOLDER_ID};
use crate::model::task::{NewTask, Priority, Task, TaskId, TaskPatch};
use crate::storage::KeyValueStorage;
use crate::store::folder_store::FolderStore;
use crate::store::task_store::TaskStore;
use crate::views::{
    folder_summaries, group_by_priority, split_by_completion, tasks_due_on, tasks_in_folder,
    FolderSummary, PriorityMatrix,
};
use chrono::{NaiveDate, TimeZone};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from workspace operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Task title is blank after trim.
    BlankTitle,
    /// Folder name is blank after trim.
    BlankFolderName,
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Target folder does not exist.
    FolderNotFound(FolderId),
    /// Target folder is built in and cannot be deleted.
    ProtectedFolder(FolderId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::BlankFolderName => write!(f, "folder name must not be blank"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::FolderNotFound(id) => write!(f, "folder not found: {id}"),
            Self::ProtectedFolder(id) => {
                write!(f, "folder is built in and cannot be deleted: {id}")
            }
        }
    }
}

impl Error for ServiceError {}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Active and completed tasks of one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderView<'a> {
    pub folder: &'a Folder,
    pub active: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

/// Explicit application state container.
///
/// Built once per session with [`Workspace::open`] and handed to consumers;
/// [`Workspace::flush`] is the teardown boundary.
pub struct Workspace<S: KeyValueStorage + Clone> {
    tasks: TaskStore<S>,
    folders: FolderStore<S>,
}

impl<S: KeyValueStorage + Clone> Workspace<S> {
    /// Creates both stores over `storage` and hydrates them.
    pub fn open(storage: S) -> Self {
        let mut tasks = TaskStore::new(storage.clone());
        let mut folders = FolderStore::new(storage);
        let task_count = tasks.hydrate();
        let folder_count = folders.hydrate();
        info!(
            "event=workspace_open module=service status=ok tasks={} folders={}",
            task_count, folder_count
        );
        Self { tasks, folders }
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn folders(&self) -> &[Folder] {
        self.folders.folders()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.get_by_id(id)
    }

    /// Direct access to the task store for callers needing raw store
    /// semantics.
    pub fn task_store_mut(&mut self) -> &mut TaskStore<S> {
        &mut self.tasks
    }

    pub fn folder_store_mut(&mut self) -> &mut FolderStore<S> {
        &mut self.folders
    }

    /// Adds a task after trimming its text fields.
    ///
    /// An empty description after trim is stored as `None`; a missing or
    /// blank folder means the inbox. Any other folder must exist.
    pub fn add_task(&mut self, mut draft: NewTask) -> ServiceResult<TaskId> {
        draft.title = normalize_title(&draft.title)?;
        draft.description = normalize_description(draft.description.as_deref());
        draft.folder = draft
            .folder
            .map(|folder| folder.trim().to_string())
            .filter(|folder| !folder.is_empty());
        if let Some(folder) = draft.folder.as_deref() {
            if !self.folders.contains(folder) {
                return Err(ServiceError::FolderNotFound(folder.to_string()));
            }
        }
        Ok(self.tasks.add(draft))
    }

    /// Saves the full-screen editor's title and description.
    pub fn edit_task(&mut self, id: &str, title: &str, description: &str) -> ServiceResult<()> {
        let title = normalize_title(title)?;
        self.ensure_task(id)?;
        self.tasks.update(
            id,
            TaskPatch {
                title: Some(title),
                description: Some(normalize_description(Some(description))),
                ..TaskPatch::default()
            },
        );
        Ok(())
    }

    pub fn set_task_priority(&mut self, id: &str, priority: Priority) -> ServiceResult<()> {
        self.ensure_task(id)?;
        self.tasks.update(id, TaskPatch::priority(priority));
        Ok(())
    }

    /// Files a task under another existing folder.
    pub fn move_task(&mut self, id: &str, folder_id: &str) -> ServiceResult<()> {
        self.ensure_task(id)?;
        if !self.folders.contains(folder_id) {
            return Err(ServiceError::FolderNotFound(folder_id.to_string()));
        }
        self.tasks.update(id, TaskPatch::folder(folder_id));
        Ok(())
    }

    /// Toggles completion and returns the new state.
    pub fn toggle_task(&mut self, id: &str) -> ServiceResult<bool> {
        self.ensure_task(id)?;
        self.tasks.toggle(id);
        Ok(self.tasks.get(id).is_some_and(|task| task.completed))
    }

    pub fn delete_task(&mut self, id: &str) -> ServiceResult<()> {
        self.ensure_task(id)?;
        self.tasks.delete(id);
        Ok(())
    }

    /// Creates a user folder and returns its id.
    pub fn add_folder(&mut self, name: &str) -> ServiceResult<FolderId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::BlankFolderName);
        }
        Ok(self.folders.add(name))
    }

    pub fn can_delete_folder(&self, id: &str) -> bool {
        !is_protected_folder(id) && self.folders.contains(id)
    }

    /// Deletes a user folder after moving its tasks to the inbox.
    ///
    /// Returns the number of tasks moved.
    pub fn delete_folder(&mut self, id: &str) -> ServiceResult<usize> {
        if is_protected_folder(id) {
            return Err(ServiceError::ProtectedFolder(id.to_string()));
        }
        if !self.folders.contains(id) {
            return Err(ServiceError::FolderNotFound(id.to_string()));
        }

        let tasks = &mut self.tasks;
        let mut moved = 0;
        self.folders.delete_with(id, |folder_id| {
            moved = reassign_tasks(tasks, folder_id, INBOX_FOLDER_ID);
        });

        info!(
            "event=folder_delete module=service status=ok moved_tasks={} folder_id={}",
            moved, id
        );
        Ok(moved)
    }

    /// Every folder with its task count, in sidebar order.
    pub fn folder_summaries(&self) -> Vec<FolderSummary<'_>> {
        folder_summaries(self.folders.folders(), self.tasks.tasks())
    }

    /// Active and completed tasks filed under `folder_id`.
    pub fn folder_view(&self, folder_id: &str) -> ServiceResult<FolderView<'_>> {
        let folder = self
            .folders
            .get_by_id(folder_id)
            .ok_or_else(|| ServiceError::FolderNotFound(folder_id.to_string()))?;
        let (active, completed) =
            split_by_completion(tasks_in_folder(self.tasks.tasks(), folder_id));
        Ok(FolderView {
            folder,
            active,
            completed,
        })
    }

    /// All tasks grouped by priority.
    pub fn matrix(&self) -> PriorityMatrix<'_> {
        group_by_priority(self.tasks.tasks())
    }

    /// Tasks due on `day` in the caller's time zone.
    pub fn due_on<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Vec<&Task> {
        tasks_due_on(self.tasks.tasks(), day, tz)
    }

    /// Re-persists both collections.
    pub fn flush(&self) {
        self.tasks.persist();
        self.folders.persist();
    }

    fn ensure_task(&self, id: &str) -> ServiceResult<()> {
        if self.tasks.get(id).is_none() {
            return Err(ServiceError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Moves every task filed under `from` to `to`, one update per task.
fn reassign_tasks<S: KeyValueStorage>(store: &mut TaskStore<S>, from: &str, to: &str) -> usize {
    let ids: Vec<TaskId> = store
        .tasks()
        .iter()
        .filter(|task| task.folder == from)
        .map(|task| task.id.clone())
        .collect();
    for id in &ids {
        store.update(id, TaskPatch::folder(to));
    }
    ids.len()
}

fn normalize_title(raw: &str) -> ServiceResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::BlankTitle);
    }
    Ok(trimmed.to_string())
}

fn normalize_description(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{normalize_description, normalize_title, ServiceError};

    #[test]
    fn normalize_title_trims_and_rejects_blank() {
        assert_eq!(normalize_title("  Buy milk ").unwrap(), "Buy milk");
        assert_eq!(normalize_title(" \n ").unwrap_err(), ServiceError::BlankTitle);
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(normalize_description(Some("   ")), None);
        assert_eq!(normalize_description(Some(" x ")), Some("x".to_string()));
        assert_eq!(normalize_description(None), None);
    }
}
