use chrono::{TimeZone, Utc};
use taskbox_core::{NewTask, Priority, Task, TaskPatch};

#[test]
fn task_serializes_with_camel_case_and_iso_dates() {
    let created = Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();
    let task = Task::with_id(
        "1710000000000",
        created,
        NewTask::new("Buy milk").with_priority(Priority::High),
    );

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "1710000000000");
    assert_eq!(json["createdAt"], "2024-03-09T10:30:00Z");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["folder"], "inbox");
    assert_eq!(json["completed"], false);
    assert!(json.get("dueDate").is_none());
    assert!(json.get("description").is_none());
}

#[test]
fn pre_folder_records_deserialize_into_inbox() {
    let raw = r#"{
        "id": "1700000000000",
        "title": "Legacy task",
        "completed": true,
        "createdAt": "2023-11-14T22:13:20.000Z",
        "dueDate": "2023-11-15T09:00:00.000Z"
    }"#;

    let task: Task = serde_json::from_str(raw).unwrap();
    assert_eq!(task.folder, "inbox");
    assert_eq!(task.priority, Priority::None);
    assert!(task.completed);
    assert_eq!(
        task.due_date,
        Some(Utc.with_ymd_and_hms(2023, 11, 15, 9, 0, 0).unwrap())
    );
}

#[test]
fn empty_or_null_folder_and_unknown_priority_use_defaults() {
    let raw = r#"[
        {"id": "a", "title": "A", "completed": false, "createdAt": "2024-01-01T00:00:00Z", "folder": ""},
        {"id": "b", "title": "B", "completed": false, "createdAt": "2024-01-01T00:00:00Z", "folder": null, "priority": "urgent"},
        {"id": "c", "title": "C", "completed": false, "createdAt": "2024-01-01T00:00:00Z", "priority": null}
    ]"#;

    let tasks: Vec<Task> = serde_json::from_str(raw).unwrap();
    assert!(tasks.iter().all(|task| task.folder == "inbox"));
    assert!(tasks.iter().all(|task| task.priority == Priority::None));
}

#[test]
fn serde_roundtrip_preserves_dates() {
    let created = Utc.timestamp_millis_opt(1_717_171_717_123).unwrap();
    let due = Utc.timestamp_millis_opt(1_717_258_117_456).unwrap();
    let task = Task::with_id(
        "t",
        created,
        NewTask::new("Dentist")
            .with_description("bring x-rays")
            .with_due_date(due)
            .with_priority(Priority::Low)
            .in_folder("health"),
    );

    let back: Task = serde_json::from_str(&serde_json::to_string(&task).unwrap()).unwrap();
    assert_eq!(back, task);
}

#[test]
fn apply_priority_patch_touches_only_priority() {
    let created = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let original = Task::with_id("id-1", created, NewTask::new("Call mom").in_folder("personal"));
    let mut patched = original.clone();

    patched.apply(&TaskPatch::priority(Priority::High));

    assert_eq!(patched.priority, Priority::High);
    assert_eq!(
        Task {
            priority: original.priority,
            ..patched
        },
        original
    );
}
