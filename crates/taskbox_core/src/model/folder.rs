//! Folder domain model.
//!
//! # Responsibility
//! - Define the persisted `Folder` record and the built-in folder set.
//! - Pick cosmetic icon/color metadata for user-created folders.
//!
//! # Invariants
//! - Built-in ids are reserved; user folders use `folder_<uuid>` ids.
//! - Icon and color of a user folder always come from the fixed palettes.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable folder identifier.
pub type FolderId = String;

/// Folder every task falls back to.
pub const INBOX_FOLDER_ID: &str = "inbox";

/// Built-in folder ids that can never be deleted.
pub const PROTECTED_FOLDER_IDS: [&str; 6] =
    ["inbox", "personal", "work", "shopping", "health", "finance"];

/// Icon palette for user-created folders.
pub const FOLDER_ICONS: [&str; 8] = [
    "folder", "work", "person", "school", "home", "business", "favorite", "star",
];

/// Color palette for user-created folders.
pub const FOLDER_COLORS: [&str; 8] = [
    "#4772fa", "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#F4A460",
];

const USER_FOLDER_ID_PREFIX: &str = "folder_";

/// Persisted folder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl Folder {
    pub fn new(
        id: impl Into<FolderId>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }

    /// Creates a user folder with a fresh id and palette picks drawn from `rng`.
    pub fn user_created<R: Rng + ?Sized>(name: impl Into<String>, rng: &mut R) -> Self {
        let icon = FOLDER_ICONS.choose(rng).copied().unwrap_or(FOLDER_ICONS[0]);
        let color = FOLDER_COLORS
            .choose(rng)
            .copied()
            .unwrap_or(FOLDER_COLORS[0]);
        Self::new(
            format!("{USER_FOLDER_ID_PREFIX}{}", Uuid::new_v4().simple()),
            name,
            icon,
            color,
        )
    }

    pub fn is_protected(&self) -> bool {
        is_protected_folder(&self.id)
    }
}

/// Returns whether `id` names a built-in folder.
pub fn is_protected_folder(id: &str) -> bool {
    PROTECTED_FOLDER_IDS.contains(&id)
}

/// Folder collection a fresh install starts with.
pub fn default_folders() -> Vec<Folder> {
    vec![
        Folder::new("inbox", "Inbox", "inbox", "#4772fa"),
        Folder::new("personal", "Personal", "person", "#FF6B6B"),
        Folder::new("work", "Work", "work", "#4ECDC4"),
        Folder::new("shopping", "Shopping", "shopping-cart", "#45B7D1"),
        Folder::new("health", "Health & Fitness", "fitness-center", "#96CEB4"),
        Folder::new("finance", "Finance", "attach-money", "#FFEAA7"),
    ]
}
