//! Task collection state and its mutation contract.
//!
//! # Responsibility
//! - Hold the ordered task collection (newest first).
//! - Apply add/toggle/update/delete/load as a closed set of actions.
//! - Re-serialize the whole collection after every mutation.
//!
//! # Invariants
//! - Mutations addressing an unknown id are silent no-ops.
//! - Persistence failures are logged and swallowed; in-memory state wins.
//! - `id` and `created_at` of a stored task never change after insert.

use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::storage::{read_json, write_json, KeyValueStorage, TASKS_KEY};
use log::{debug, info, warn};

/// Closed set of task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Add(Task),
    Toggle(TaskId),
    Update { id: TaskId, patch: TaskPatch },
    Delete(TaskId),
    Load(Vec<Task>),
}

impl TaskAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Toggle(_) => "toggle",
            Self::Update { .. } => "update",
            Self::Delete(_) => "delete",
            Self::Load(_) => "load",
        }
    }
}

/// Applies `action` to `tasks` in place.
///
/// Returns `true` when the action addressed an existing record (always `true`
/// for `Add` and `Load`).
pub fn reduce_tasks(tasks: &mut Vec<Task>, action: TaskAction) -> bool {
    match action {
        TaskAction::Add(task) => {
            tasks.insert(0, task);
            true
        }
        TaskAction::Toggle(id) => match tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        },
        TaskAction::Update { id, patch } => match tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.apply(&patch);
                true
            }
            None => false,
        },
        TaskAction::Delete(id) => {
            let before = tasks.len();
            tasks.retain(|task| task.id != id);
            tasks.len() != before
        }
        TaskAction::Load(records) => {
            *tasks = records.into_iter().map(Task::normalize_legacy).collect();
            true
        }
    }
}

/// Task state container persisting through a key-value storage.
pub struct TaskStore<S: KeyValueStorage> {
    storage: S,
    tasks: Vec<Task>,
    hydrated: bool,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Creates an empty store. Call [`TaskStore::hydrate`] once to load
    /// persisted state.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            tasks: Vec::new(),
            hydrated: false,
        }
    }

    /// Loads the persisted collection, once per store.
    ///
    /// Read or decode failures are logged and leave the current state in
    /// place. Returns the number of tasks held afterwards.
    pub fn hydrate(&mut self) -> usize {
        if self.hydrated {
            debug!("event=tasks_hydrate module=store status=skipped reason=already_hydrated");
            return self.tasks.len();
        }
        self.hydrated = true;

        match read_json::<Vec<Task>, _>(&self.storage, TASKS_KEY) {
            Ok(Some(records)) => {
                self.dispatch(TaskAction::Load(records));
                info!(
                    "event=tasks_hydrate module=store status=ok count={}",
                    self.tasks.len()
                );
            }
            Ok(None) => {
                info!("event=tasks_hydrate module=store status=ok count=0 stored=false");
            }
            Err(err) => {
                warn!(
                    "event=tasks_hydrate module=store status=error error_code=tasks_load_failed error={}",
                    err
                );
            }
        }
        self.tasks.len()
    }

    /// Current collection, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Creates a task at the front of the collection and returns its id.
    ///
    /// Blank titles are not rejected here; callers validate input first.
    pub fn add(&mut self, draft: NewTask) -> TaskId {
        let task = Task::new(draft);
        let id = task.id.clone();
        self.dispatch(TaskAction::Add(task));
        id
    }

    /// Flips `completed` on the matching task.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.dispatch(TaskAction::Toggle(id.to_string()))
    }

    /// Merges `patch` into the matching task.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> bool {
        self.dispatch(TaskAction::Update {
            id: id.to_string(),
            patch,
        })
    }

    /// Removes the matching task.
    pub fn delete(&mut self, id: &str) -> bool {
        self.dispatch(TaskAction::Delete(id.to_string()))
    }

    /// Replaces the whole collection.
    pub fn load(&mut self, records: Vec<Task>) {
        self.dispatch(TaskAction::Load(records));
    }

    /// Reduces `action` into the collection, then persists it.
    pub fn dispatch(&mut self, action: TaskAction) -> bool {
        let name = action.name();
        let matched = reduce_tasks(&mut self.tasks, action);
        if !matched {
            debug!("event=task_mutation module=store status=noop action={name} reason=not_found");
        }
        self.persist();
        matched
    }

    /// Writes the full collection under the `tasks` key.
    ///
    /// Failures are logged, never returned.
    pub fn persist(&self) {
        if let Err(err) = write_json(&self.storage, TASKS_KEY, &self.tasks) {
            warn!(
                "event=tasks_persist module=store status=error error_code=tasks_save_failed count={} error={}",
                self.tasks.len(),
                err
            );
        }
    }
}
