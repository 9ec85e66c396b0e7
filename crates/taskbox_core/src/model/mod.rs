//! Domain model for tasks and the folders that organize them.
//!
//! # Responsibility
//! - Define the canonical records persisted under the `tasks` and `folders`
//!   storage keys.
//! - Apply field defaults at construction time instead of leaving them
//!   nullable downstream.
//!
//! # Invariants
//! - `Task::id` and `Task::created_at` are assigned once and never patched.
//! - Every task belongs to exactly one folder id (`inbox` when unspecified).
//! - Built-in folders are never removed from a folder collection.

pub mod folder;
pub mod task;
