//! Read-only projections over the task collection.
//!
//! Everything here is recomputed from the current collection on every call
//! and keeps the input order (newest first).

use crate::model::folder::Folder;
use crate::model::task::{Priority, Task};
use chrono::{NaiveDate, TimeZone};

/// One folder with the number of tasks filed under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderSummary<'a> {
    pub folder: &'a Folder,
    pub task_count: usize,
}

/// Tasks grouped by priority for the matrix view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityMatrix<'a> {
    pub high: Vec<&'a Task>,
    pub medium: Vec<&'a Task>,
    pub low: Vec<&'a Task>,
    pub none: Vec<&'a Task>,
}

impl<'a> PriorityMatrix<'a> {
    pub fn bucket(&self, priority: Priority) -> &[&'a Task] {
        match priority {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
            Priority::None => &self.none,
        }
    }

    fn bucket_mut(&mut self, priority: Priority) -> &mut Vec<&'a Task> {
        match priority {
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
            Priority::None => &mut self.none,
        }
    }

    pub fn len(&self) -> usize {
        Priority::ALL
            .iter()
            .map(|priority| self.bucket(*priority).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tasks filed under exactly `folder_id`.
pub fn tasks_in_folder<'a>(tasks: &'a [Task], folder_id: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.folder == folder_id).collect()
}

/// Splits tasks into `(active, completed)`.
pub fn split_by_completion<'a, I>(tasks: I) -> (Vec<&'a Task>, Vec<&'a Task>)
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().partition(|task| !task.completed)
}

/// Groups tasks by priority.
pub fn group_by_priority<'a, I>(tasks: I) -> PriorityMatrix<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut matrix = PriorityMatrix::default();
    for task in tasks {
        matrix.bucket_mut(task.priority).push(task);
    }
    matrix
}

pub fn folder_task_count(tasks: &[Task], folder_id: &str) -> usize {
    tasks.iter().filter(|task| task.folder == folder_id).count()
}

/// Every folder, in collection order, with its task count.
pub fn folder_summaries<'a>(folders: &'a [Folder], tasks: &[Task]) -> Vec<FolderSummary<'a>> {
    folders
        .iter()
        .map(|folder| FolderSummary {
            folder,
            task_count: folder_task_count(tasks, &folder.id),
        })
        .collect()
}

/// Tasks whose due date falls on `day` as seen from `tz`.
pub fn tasks_due_on<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| {
            task.due_date
                .is_some_and(|due| due.with_timezone(tz).date_naive() == day)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{group_by_priority, split_by_completion};
    use crate::model::task::{NewTask, Priority, Task};
    use chrono::Utc;

    #[test]
    fn empty_input_yields_empty_views() {
        let tasks: Vec<Task> = Vec::new();
        let (active, completed) = split_by_completion(&tasks);
        assert!(active.is_empty() && completed.is_empty());
        assert!(group_by_priority(&tasks).is_empty());
    }

    #[test]
    fn matrix_bucket_matches_priority() {
        let tasks = vec![Task::with_id(
            "a",
            Utc::now(),
            NewTask::new("a").with_priority(Priority::Medium),
        )];
        let matrix = group_by_priority(&tasks);
        assert_eq!(matrix.bucket(Priority::Medium).len(), 1);
        assert_eq!(matrix.len(), 1);
    }
}
