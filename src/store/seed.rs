//! Seed dataset used on first run and whenever a persisted collection is missing.

use crate::tree::node::{FileNode, FolderNode};
use chrono::{DateTime, Utc};

pub const DOCUMENTS_FOLDER_ID: &str = "folder-documents";
pub const PICTURES_FOLDER_ID: &str = "folder-pictures";
pub const README_FILE_ID: &str = "file-readme";
pub const TODO_FILE_ID: &str = "file-todo";

pub const README_CONTENT: &str =
    "Welcome to Talos!\n\nThis is a simulated operating system with an in-memory filesystem.";
pub const TODO_CONTENT: &str = "1. Learn Rust\n2. Build an OS simulation\n3. ???\n4. Profit!";

/// Seed folders: `Documents` and `Pictures` at the root.
pub fn seed_folders(now: DateTime<Utc>) -> Vec<FolderNode> {
    [(DOCUMENTS_FOLDER_ID, "Documents"), (PICTURES_FOLDER_ID, "Pictures")]
        .into_iter()
        .map(|(id, name)| FolderNode {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: None,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Seed files: `README.txt` at the root and `todo.txt` inside `Documents`.
pub fn seed_files(now: DateTime<Utc>) -> Vec<FileNode> {
    vec![
        FileNode {
            id: README_FILE_ID.to_string(),
            name: "README.txt".to_string(),
            content: README_CONTENT.to_string(),
            file_type: "txt".to_string(),
            parent_id: None,
            created_at: now,
            updated_at: now,
        },
        FileNode {
            id: TODO_FILE_ID.to_string(),
            name: "todo.txt".to_string(),
            content: TODO_CONTENT.to_string(),
            file_type: "txt".to_string(),
            parent_id: Some(DOCUMENTS_FOLDER_ID.to_string()),
            created_at: now,
            updated_at: now,
        },
    ]
}
