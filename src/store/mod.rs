//! Node Store
//!
//! Authoritative holder of every file and folder record. Both collections are
//! flat; folder membership is derived from `parent_id`. Every mutation is
//! written through to the configured backend before the call returns.

pub mod handle;
pub mod persistence;
pub mod seed;

pub use handle::StoreHandle;
pub use persistence::{FileBackend, KeyValueBackend, MemoryBackend, Snapshot};

use crate::error::StorageError;
use crate::tree::ids::generate_node_id;
use crate::tree::node::{type_from_name, FileNode, FolderNode, NodeKind};
use crate::tree::resolver;
use crate::types::{FolderRef, NodeId};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info};

/// Counts of records removed by a cascading folder delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub folders: usize,
    pub files: usize,
}

/// NodeStore: files, folders, and the shared navigation cursor
pub struct NodeStore {
    files: Vec<FileNode>,
    folders: Vec<FolderNode>,
    current_folder: FolderRef,
    backend: Box<dyn KeyValueBackend>,
}

impl NodeStore {
    /// Open a store over `backend`, rehydrating persisted state (or the seed).
    pub fn open(backend: Box<dyn KeyValueBackend>) -> Self {
        let snapshot = persistence::load_snapshot(backend.as_ref());
        Self {
            files: snapshot.files,
            folders: snapshot.folders,
            current_folder: None,
            backend,
        }
    }

    /// Seeded store backed by memory only
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryBackend::new()))
    }

    pub fn files(&self) -> &[FileNode] {
        &self.files
    }

    pub fn folders(&self) -> &[FolderNode] {
        &self.folders
    }

    /// Location of the backing storage
    pub fn backend_description(&self) -> String {
        self.backend.describe()
    }

    pub fn create_file(
        &mut self,
        name: &str,
        content: &str,
        file_type: &str,
        parent_id: Option<&str>,
    ) -> Result<FileNode, StorageError> {
        self.ensure_parent(parent_id)?;
        self.ensure_name_free(parent_id, name, None)?;

        let mut id = generate_node_id(NodeKind::File);
        while self.file_by_id(&id).is_some() {
            id = generate_node_id(NodeKind::File);
        }
        let now = Utc::now();
        let file = FileNode {
            id,
            name: name.to_string(),
            content: content.to_string(),
            file_type: file_type.to_string(),
            parent_id: parent_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        self.files.push(file.clone());
        info!(file_id = %file.id, name, "Created file");
        self.persist()?;
        Ok(file)
    }

    pub fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<FolderNode, StorageError> {
        self.ensure_parent(parent_id)?;
        self.ensure_name_free(parent_id, name, None)?;

        let mut id = generate_node_id(NodeKind::Folder);
        while self.folder_by_id(&id).is_some() {
            id = generate_node_id(NodeKind::Folder);
        }
        let now = Utc::now();
        let folder = FolderNode {
            id,
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        self.folders.push(folder.clone());
        info!(folder_id = %folder.id, name, "Created folder");
        self.persist()?;
        Ok(folder)
    }

    /// Replace a file's content and bump its modification time.
    pub fn update_file_content(&mut self, id: &str, content: &str) -> Result<(), StorageError> {
        let file = self.file_mut(id)?;
        file.content = content.to_string();
        file.updated_at = Utc::now();
        debug!(file_id = id, "Updated file content");
        self.persist()
    }

    /// Bump a file's modification time without touching its content.
    pub fn touch_file(&mut self, id: &str) -> Result<(), StorageError> {
        let file = self.file_mut(id)?;
        file.updated_at = Utc::now();
        self.persist()
    }

    /// Rename a file; the type tag follows the new extension.
    pub fn rename_file(&mut self, id: &str, new_name: &str) -> Result<(), StorageError> {
        let parent = self
            .file_by_id(id)
            .ok_or_else(|| StorageError::NodeNotFound(id.to_string()))?
            .parent_id
            .clone();
        self.ensure_name_free(parent.as_deref(), new_name, Some(id))?;

        let file = self.file_mut(id)?;
        file.file_type = type_from_name(new_name, &file.file_type);
        file.name = new_name.to_string();
        file.updated_at = Utc::now();
        info!(file_id = id, new_name, "Renamed file");
        self.persist()
    }

    pub fn rename_folder(&mut self, id: &str, new_name: &str) -> Result<(), StorageError> {
        let parent = self
            .folder_by_id(id)
            .ok_or_else(|| StorageError::NodeNotFound(id.to_string()))?
            .parent_id
            .clone();
        self.ensure_name_free(parent.as_deref(), new_name, Some(id))?;

        let folder = self
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| StorageError::NodeNotFound(id.to_string()))?;
        folder.name = new_name.to_string();
        folder.updated_at = Utc::now();
        info!(folder_id = id, new_name, "Renamed folder");
        self.persist()
    }

    /// Remove a file. Returns whether anything was removed.
    pub fn delete_file(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        if self.files.len() == before {
            return Ok(false);
        }
        info!(file_id = id, "Deleted file");
        self.persist()?;
        Ok(true)
    }

    /// Remove a folder together with every descendant file and folder.
    ///
    /// Descendant ids are gathered first by following parent links, then all
    /// of them are removed in one pass. A cursor left inside the removed
    /// subtree moves to the removed folder's parent.
    pub fn delete_folder(&mut self, id: &str) -> Result<DeleteSummary, StorageError> {
        let Some(target) = self.folder_by_id(id) else {
            return Ok(DeleteSummary::default());
        };
        let landing = target.parent_id.clone();

        let mut doomed: HashSet<NodeId> = HashSet::new();
        let mut frontier = vec![id.to_string()];
        while let Some(next) = frontier.pop() {
            if !doomed.insert(next.clone()) {
                continue;
            }
            frontier.extend(
                self.folders
                    .iter()
                    .filter(|f| f.parent_id.as_deref() == Some(next.as_str()))
                    .map(|f| f.id.clone()),
            );
        }

        let files_before = self.files.len();
        let folders_before = self.folders.len();
        self.files
            .retain(|f| !f.parent_id.as_ref().is_some_and(|p| doomed.contains(p)));
        self.folders.retain(|f| !doomed.contains(&f.id));
        let summary = DeleteSummary {
            folders: folders_before - self.folders.len(),
            files: files_before - self.files.len(),
        };

        if self
            .current_folder
            .as_ref()
            .is_some_and(|current| doomed.contains(current))
        {
            self.current_folder = landing;
        }

        info!(
            folder_id = id,
            folders = summary.folders,
            files = summary.files,
            "Deleted folder tree"
        );
        self.persist()?;
        Ok(summary)
    }

    /// Direct child files of `parent_id` (root when `None`), in insertion order.
    pub fn files_in_folder(&self, parent_id: Option<&str>) -> Vec<&FileNode> {
        self.files
            .iter()
            .filter(|f| f.parent_id.as_deref() == parent_id)
            .collect()
    }

    /// Direct child folders of `parent_id` (root when `None`), in insertion order.
    pub fn folders_in_folder(&self, parent_id: Option<&str>) -> Vec<&FolderNode> {
        self.folders
            .iter()
            .filter(|f| f.parent_id.as_deref() == parent_id)
            .collect()
    }

    pub fn file_by_id(&self, id: &str) -> Option<&FileNode> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn folder_by_id(&self, id: &str) -> Option<&FolderNode> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn current_folder(&self) -> Option<&str> {
        self.current_folder.as_deref()
    }

    pub fn navigate_to_folder(&mut self, folder: FolderRef) {
        self.current_folder = folder;
    }

    /// Display path of the navigation cursor, e.g. `C:\Documents\`.
    pub fn current_path(&self, root_label: &str) -> String {
        resolver::display_path(self, self.current_folder(), root_label)
    }

    /// Replace both collections with the seed dataset and move to the root.
    pub fn reset_to_seed(&mut self) -> Result<(), StorageError> {
        let now = Utc::now();
        self.files = seed::seed_files(now);
        self.folders = seed::seed_folders(now);
        self.current_folder = None;
        info!("Reset filesystem to seed data");
        self.persist()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            files: self.files.clone(),
            folders: self.folders.clone(),
        }
    }

    fn file_mut(&mut self, id: &str) -> Result<&mut FileNode, StorageError> {
        self.files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| StorageError::NodeNotFound(id.to_string()))
    }

    fn ensure_parent(&self, parent_id: Option<&str>) -> Result<(), StorageError> {
        match parent_id {
            Some(id) if self.folder_by_id(id).is_none() => {
                Err(StorageError::ParentNotFound(id.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Reject names no path can reach, then names already used by a sibling.
    fn ensure_name_free(
        &self,
        parent_id: Option<&str>,
        name: &str,
        except: Option<&str>,
    ) -> Result<(), StorageError> {
        if !is_valid_name(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        let taken = self
            .files_in_folder(parent_id)
            .iter()
            .map(|f| (&f.id, &f.name))
            .chain(self.folders_in_folder(parent_id).iter().map(|f| (&f.id, &f.name)))
            .any(|(id, existing)| existing == name && Some(id.as_str()) != except);
        if taken {
            return Err(StorageError::NameConflict {
                name: name.to_string(),
                parent: parent_id.unwrap_or("root").to_string(),
            });
        }
        Ok(())
    }

    /// Write-through: the in-memory change stands even if the write fails,
    /// and the next successful write brings storage up to date.
    fn persist(&self) -> Result<(), StorageError> {
        persistence::save_collections(self.backend.as_ref(), &self.files, &self.folders)
    }
}

/// A name is addressable when it is a single non-empty path segment other
/// than `.` or `..`.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| c == '/' || c == '\\')
}
