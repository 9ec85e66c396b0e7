//! Core domain logic for Taskbox.
//! This crate is the single source of truth for task/folder invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;
pub mod views;

pub use logging::{default_log_level, init_logging};
pub use model::folder::{
    default_folders, is_protected_folder, Folder, FolderId, INBOX_FOLDER_ID, PROTECTED_FOLDER_IDS,
};
pub use model::task::{NewTask, Priority, Task, TaskId, TaskPatch};
pub use service::workspace::{FolderView, ServiceError, ServiceResult, Workspace};
pub use storage::{
    KeyValueStorage, MemoryStorage, SqliteKeyValueStorage, StorageError, StorageResult,
    FOLDERS_KEY, TASKS_KEY,
};
pub use store::folder_store::{FolderAction, FolderStore};
pub use store::task_store::{TaskAction, TaskStore};
pub use views::{FolderSummary, PriorityMatrix};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
