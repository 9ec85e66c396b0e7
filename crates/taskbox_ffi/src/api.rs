//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task/folder use cases to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the configured storage, hydrates a workspace, performs
//!   one use case and drops the connection.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use taskbox_core::db::open_db;
use taskbox_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    NewTask, Priority, ServiceError, SqliteKeyValueStorage, Task, Workspace,
};

const DB_FILE_NAME: &str = "taskbox.sqlite3";
const DB_PATH_ENV: &str = "TASKBOX_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
// Each call rewrites whole collections; calls must not interleave.
static WORKSPACE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row for list screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// `high|medium|low|none`.
    pub priority: String,
    pub folder_id: String,
    /// Epoch milliseconds.
    pub due_date_ms: Option<i64>,
    /// Epoch milliseconds.
    pub created_at_ms: i64,
}

/// Folder row for the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderItem {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub task_count: u32,
    /// `false` for built-in folders.
    pub deletable: bool,
}

/// Task list envelope for one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    pub active: Vec<TaskItem>,
    pub completed: Vec<TaskItem>,
    pub message: String,
}

/// Folder list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListResponse {
    pub ok: bool,
    pub items: Vec<FolderItem>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created or affected id, when there is one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: Some(id.into()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Lists one folder's tasks split into active and completed.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list(folder_id: String) -> TaskListResponse {
    let result = with_workspace(|workspace| {
        let view = workspace.folder_view(folder_id.trim())?;
        Ok((
            view.active.into_iter().map(to_task_item).collect::<Vec<_>>(),
            view.completed.into_iter().map(to_task_item).collect::<Vec<_>>(),
        ))
    });
    match result {
        Ok((active, completed)) => TaskListResponse {
            ok: true,
            message: format!("{} active, {} completed.", active.len(), completed.len()),
            active,
            completed,
        },
        Err(err) => TaskListResponse {
            ok: false,
            active: Vec::new(),
            completed: Vec::new(),
            message: format!("task_list failed: {err}"),
        },
    }
}

/// Creates a task. Empty `priority`/`folder_id` fall back to defaults; an
/// unknown priority or folder is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    title: String,
    description: Option<String>,
    priority: Option<String>,
    folder_id: Option<String>,
) -> ActionResponse {
    let priority = match priority.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match Priority::parse(raw) {
            Some(parsed) => Some(parsed),
            None => {
                return ActionResponse::failure(format!(
                    "task_add failed: unknown priority `{raw}`"
                ))
            }
        },
    };
    let mut draft = NewTask::new(title);
    draft.description = description;
    draft.priority = priority;
    draft.folder = folder_id;
    let result = with_workspace(|workspace| Ok(workspace.add_task(draft)?));
    respond("task_add", "Task created.", result)
}

/// Flips a task's completion state.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> ActionResponse {
    let result = with_workspace(|workspace| Ok(workspace.toggle_task(&id)?));
    match result {
        Ok(true) => ActionResponse::success("Task completed.", id),
        Ok(false) => ActionResponse::success("Task reopened.", id),
        Err(err) => ActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Saves title and description from the task editor.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(id: String, title: String, description: String) -> ActionResponse {
    let result = with_workspace(|workspace| {
        workspace.edit_task(&id, &title, &description)?;
        Ok(id.clone())
    });
    respond("task_edit", "Task updated.", result)
}

/// Sets a task's priority (`high|medium|low|none`).
#[flutter_rust_bridge::frb(sync)]
pub fn task_set_priority(id: String, priority: String) -> ActionResponse {
    let Some(priority) = Priority::parse(&priority) else {
        return ActionResponse::failure(format!(
            "task_set_priority failed: unknown priority `{}`",
            priority.trim()
        ));
    };
    let result = with_workspace(|workspace| {
        workspace.set_task_priority(&id, priority)?;
        Ok(id.clone())
    });
    respond("task_set_priority", "Priority updated.", result)
}

/// Moves a task into another folder.
#[flutter_rust_bridge::frb(sync)]
pub fn task_move(id: String, folder_id: String) -> ActionResponse {
    let result = with_workspace(|workspace| {
        workspace.move_task(&id, folder_id.trim())?;
        let name = workspace
            .folder(folder_id.trim())
            .map(|folder| folder.name.clone())
            .unwrap_or_default();
        Ok(name)
    });
    match result {
        Ok(name) => ActionResponse::success(format!("Moved to {name}."), id),
        Err(err) => ActionResponse::failure(format!("task_move failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: String) -> ActionResponse {
    let result = with_workspace(|workspace| {
        workspace.delete_task(&id)?;
        Ok(id.clone())
    });
    respond("task_delete", "Task deleted.", result)
}

/// Lists folders with task counts in sidebar order.
#[flutter_rust_bridge::frb(sync)]
pub fn folder_list() -> FolderListResponse {
    let result = with_workspace(|workspace| {
        Ok(workspace
            .folder_summaries()
            .into_iter()
            .map(|summary| FolderItem {
                id: summary.folder.id.clone(),
                name: summary.folder.name.clone(),
                icon: summary.folder.icon.clone(),
                color: summary.folder.color.clone(),
                task_count: u32::try_from(summary.task_count).unwrap_or(u32::MAX),
                deletable: !summary.folder.is_protected(),
            })
            .collect::<Vec<_>>())
    });
    match result {
        Ok(items) => FolderListResponse {
            ok: true,
            message: format!("{} folder(s).", items.len()),
            items,
        },
        Err(err) => FolderListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("folder_list failed: {err}"),
        },
    }
}

/// Creates a user folder and returns its id for navigation.
#[flutter_rust_bridge::frb(sync)]
pub fn folder_add(name: String) -> ActionResponse {
    let result = with_workspace(|workspace| Ok(workspace.add_folder(&name)?));
    respond("folder_add", "Folder created.", result)
}

/// Deletes a user folder, moving its tasks to the inbox.
#[flutter_rust_bridge::frb(sync)]
pub fn folder_delete(id: String) -> ActionResponse {
    match with_workspace(|workspace| Ok(workspace.delete_folder(&id)?)) {
        Ok(moved) => ActionResponse::success(
            format!("Folder deleted; {moved} task(s) moved to Inbox."),
            id,
        ),
        Err(err) => ActionResponse::failure(format!("folder_delete failed: {err}")),
    }
}

/// Failure of one FFI call: storage bootstrap or use-case rejection.
#[derive(Debug)]
enum FfiError {
    Storage(String),
    Service(ServiceError),
}

impl std::fmt::Display for FfiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(message) => write!(f, "{message}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl From<ServiceError> for FfiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

fn respond(operation: &str, message: &str, result: Result<String, FfiError>) -> ActionResponse {
    match result {
        Ok(id) => ActionResponse::success(message, id),
        Err(err) => ActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_workspace<T>(
    f: impl FnOnce(&mut Workspace<SqliteKeyValueStorage<'_>>) -> Result<T, FfiError>,
) -> Result<T, FfiError> {
    let _guard = WORKSPACE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_db(resolve_db_path())
        .map_err(|err| FfiError::Storage(format!("storage open failed: {err}")))?;
    let storage = SqliteKeyValueStorage::try_new(&conn)
        .map_err(|err| FfiError::Storage(format!("storage init failed: {err}")))?;
    let mut workspace = Workspace::open(storage);
    f(&mut workspace)
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        completed: task.completed,
        priority: task.priority.as_str().to_string(),
        folder_id: task.folder.clone(),
        due_date_ms: task.due_date.map(|due| due.timestamp_millis()),
        created_at_ms: task.created_at.timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, folder_add, folder_delete, folder_list, init_logging, ping, task_add,
        task_edit, task_list, task_move, task_set_priority, task_toggle,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn task_add_defaults_to_inbox_and_lists_as_active() {
        let title = unique_token("inbox-task");
        let created = task_add(title.clone(), None, None, None);
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("task_add should return id");

        let listed = task_list("inbox".to_string());
        assert!(listed.ok, "{}", listed.message);
        let item = listed
            .active
            .iter()
            .find(|item| item.id == id)
            .expect("new task should be active in inbox");
        assert_eq!(item.title, title);
        assert_eq!(item.priority, "none");
    }

    #[test]
    fn task_add_rejects_blank_title() {
        let response = task_add("   ".to_string(), None, None, None);
        assert!(!response.ok);
        assert!(response.message.contains("blank"));
    }

    #[test]
    fn toggle_edit_and_priority_roundtrip() {
        let created = task_add(unique_token("edit"), None, Some("low".to_string()), None);
        let id = created.id.expect("task id");

        let toggled = task_toggle(id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        assert_eq!(toggled.message, "Task completed.");

        assert!(task_edit(id.clone(), "Renamed".to_string(), String::new()).ok);
        assert!(task_set_priority(id.clone(), "HIGH".to_string()).ok);
        assert!(!task_set_priority(id.clone(), "urgent".to_string()).ok);

        let listed = task_list("inbox".to_string());
        let item = listed
            .completed
            .iter()
            .find(|item| item.id == id)
            .expect("toggled task should be completed");
        assert_eq!(item.title, "Renamed");
        assert_eq!(item.priority, "high");
        assert_eq!(item.description, None);
    }

    #[test]
    fn task_add_rejects_unknown_priority_and_folder() {
        let title = unique_token("bad-input");
        let bad_priority = task_add(title.clone(), None, Some("urgent".to_string()), None);
        assert!(!bad_priority.ok);
        assert!(bad_priority.message.contains("unknown priority"));

        let bad_folder = task_add(title.clone(), None, None, Some("folder_nowhere".to_string()));
        assert!(!bad_folder.ok);
        assert!(bad_folder.message.contains("folder not found"));

        let blank = task_add(title.clone(), None, Some("  ".to_string()), Some(String::new()));
        assert!(blank.ok, "{}", blank.message);
        let listed = task_list("inbox".to_string());
        let matching: Vec<_> = listed
            .active
            .iter()
            .filter(|item| item.title == title)
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].priority, "none");
    }

    #[test]
    fn folder_delete_moves_tasks_to_inbox() {
        let folder = folder_add(unique_token("folder"));
        assert!(folder.ok, "{}", folder.message);
        let folder_id = folder.id.expect("folder id");

        let task = task_add(unique_token("in-folder"), None, None, Some(folder_id.clone()));
        let task_id = task.id.expect("task id");

        let deleted = folder_delete(folder_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(deleted.message.contains("1 task(s)"));

        let folders = folder_list();
        assert!(folders.items.iter().all(|item| item.id != folder_id));
        assert!(task_list("inbox".to_string())
            .active
            .iter()
            .any(|item| item.id == task_id));
    }

    #[test]
    fn builtin_folders_are_listed_and_not_deletable() {
        let folders = folder_list();
        assert!(folders.ok, "{}", folders.message);
        let inbox = folders
            .items
            .iter()
            .find(|item| item.id == "inbox")
            .expect("inbox should exist");
        assert!(!inbox.deletable);
        assert!(!folder_delete("inbox".to_string()).ok);
    }

    #[test]
    fn task_move_rejects_unknown_folder() {
        let task = task_add(unique_token("move"), None, None, None);
        let id = task.id.expect("task id");
        let response = task_move(id, "folder_does_not_exist".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("folder not found"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
