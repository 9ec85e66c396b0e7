//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskbox_core` linkage and storage bootstrap outside the app.
//! - Print a deterministic folder summary for quick local sanity checks.
//!
//! Usage: `taskbox_cli [db_path]`; falls back to `TASKBOX_DB_PATH`, then to
//! `<temp_dir>/taskbox.sqlite3`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use taskbox_core::db::open_db;
use taskbox_core::{SqliteKeyValueStorage, Workspace};

const DB_PATH_ENV: &str = "TASKBOX_DB_PATH";
const DB_FILE_NAME: &str = "taskbox.sqlite3";

fn main() -> ExitCode {
    println!("taskbox_core ping={}", taskbox_core::ping());
    println!("taskbox_core version={}", taskbox_core::core_version());

    let db_path = resolve_db_path(std::env::args().nth(1));
    match print_summary(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskbox_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_db_path(arg: Option<String>) -> PathBuf {
    arg.or_else(|| std::env::var(DB_PATH_ENV).ok())
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME))
}

fn print_summary(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let workspace = Workspace::open(SqliteKeyValueStorage::try_new(&conn)?);

    println!("db_path={}", db_path.display());
    println!("tasks={}", workspace.tasks().len());
    for summary in workspace.folder_summaries() {
        println!(
            "folder id={} tasks={} protected={}",
            summary.folder.id,
            summary.task_count,
            summary.folder.is_protected()
        );
    }

    let matrix = workspace.matrix();
    for priority in taskbox_core::Priority::ALL {
        println!(
            "priority {}={}",
            priority.as_str(),
            matrix.bucket(priority).len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resolve_db_path;
    use std::path::PathBuf;

    #[test]
    fn explicit_argument_wins() {
        assert_eq!(
            resolve_db_path(Some(" /data/tasks.sqlite3 ".to_string())),
            PathBuf::from("/data/tasks.sqlite3")
        );
    }
}
