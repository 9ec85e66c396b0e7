//! Task and folder state containers.
//!
//! # Responsibility
//! - Own the in-memory collections and their reducer-style mutations.
//! - Persist each collection as one JSON document after every change.
//!
//! # Invariants
//! - Stores are single-writer; mutation requires `&mut self`.
//! - The two stores are independent; folder/task consistency is the
//!   caller's job (see `service::workspace`).

pub mod folder_store;
pub mod task_store;
