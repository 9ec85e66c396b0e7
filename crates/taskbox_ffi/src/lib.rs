//! Flutter-facing bindings for Taskbox core.

pub mod api;
