use chrono::{NaiveDate, TimeZone, Utc};
use taskbox_core::views::{
    folder_summaries, folder_task_count, group_by_priority, split_by_completion, tasks_due_on,
    tasks_in_folder,
};
use taskbox_core::{default_folders, NewTask, Priority, Task};

fn fixture() -> Vec<Task> {
    let created = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
    let mut done = Task::with_id("4", created, NewTask::new("done").in_folder("work"));
    done.completed = true;
    vec![
        Task::with_id(
            "1",
            created,
            NewTask::new("urgent")
                .with_priority(Priority::High)
                .in_folder("work")
                .with_due_date(Utc.with_ymd_and_hms(2024, 4, 2, 23, 30, 0).unwrap()),
        ),
        Task::with_id("2", created, NewTask::new("someday")),
        Task::with_id(
            "3",
            created,
            NewTask::new("soon")
                .with_priority(Priority::Medium)
                .with_due_date(Utc.with_ymd_and_hms(2024, 4, 2, 8, 0, 0).unwrap()),
        ),
        done,
    ]
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|task| task.id.clone()).collect()
}

#[test]
fn folder_filter_is_strict() {
    let tasks = fixture();
    assert_eq!(ids(&tasks_in_folder(&tasks, "work")), vec!["1", "4"]);
    assert_eq!(ids(&tasks_in_folder(&tasks, "inbox")), vec!["2", "3"]);
    assert!(tasks_in_folder(&tasks, "finance").is_empty());
}

#[test]
fn split_keeps_order() {
    let tasks = fixture();
    let (active, completed) = split_by_completion(tasks_in_folder(&tasks, "work"));
    assert_eq!(ids(&active), vec!["1"]);
    assert_eq!(ids(&completed), vec!["4"]);
}

#[test]
fn matrix_groups_every_task_once() {
    let tasks = fixture();
    let matrix = group_by_priority(&tasks);

    assert_eq!(ids(&matrix.high), vec!["1"]);
    assert_eq!(ids(&matrix.medium), vec!["3"]);
    assert!(matrix.low.is_empty());
    assert_eq!(ids(&matrix.none), vec!["2", "4"]);
    assert_eq!(matrix.len(), tasks.len());
}

#[test]
fn summaries_count_tasks_per_folder() {
    let tasks = fixture();
    let folders = default_folders();
    let summaries = folder_summaries(&folders, &tasks);

    assert_eq!(summaries.len(), folders.len());
    let count = |id: &str| {
        summaries
            .iter()
            .find(|summary| summary.folder.id == id)
            .map(|summary| summary.task_count)
    };
    assert_eq!(count("inbox"), Some(2));
    assert_eq!(count("work"), Some(2));
    assert_eq!(count("finance"), Some(0));
    assert_eq!(folder_task_count(&tasks, "inbox"), 2);
}

#[test]
fn due_on_respects_time_zone() {
    let tasks = fixture();
    let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
    assert_eq!(ids(&tasks_due_on(&tasks, day, &Utc)), vec!["1", "3"]);

    let plus_two = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
    assert_eq!(ids(&tasks_due_on(&tasks, day, &plus_two)), vec!["3"]);
}
