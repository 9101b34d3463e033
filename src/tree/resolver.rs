//! Path resolution against the node store.
//!
//! Paths use `/` or `\` as separators. A leading `/`, a drive prefix such as
//! `C:\`, the configured root label, or `~` anchors the path at the root;
//! anything else is relative to the caller's current folder.

use crate::store::NodeStore;
use crate::types::{FolderRef, NodeId};
use std::collections::HashSet;

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A folder; `None` is the root
    Folder(FolderRef),
    File(NodeId),
    NotFound,
}

impl Resolved {
    pub fn is_found(&self) -> bool {
        !matches!(self, Resolved::NotFound)
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Strip a root anchor, returning the remainder if the path is absolute.
fn strip_root_marker<'a>(path: &'a str, root_label: &str) -> Option<&'a str> {
    if let Some(rest) = path.strip_prefix(is_separator) {
        return Some(rest);
    }
    if path == "~" {
        return Some("");
    }
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        return Some(rest);
    }
    if !root_label.is_empty() {
        if let Some(rest) = path.strip_prefix(root_label) {
            if rest.is_empty() {
                return Some(rest);
            }
            if let Some(rest) = rest.strip_prefix(is_separator) {
                return Some(rest);
            }
        }
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let rest = &path[2..];
        if rest.is_empty() {
            return Some(rest);
        }
        if let Some(rest) = rest.strip_prefix(is_separator) {
            return Some(rest);
        }
    }
    None
}

/// Resolve `path` relative to `current` (root when `None`).
///
/// Name matching is exact and case-sensitive; the first match in insertion
/// order wins. Folders shadow files of the same name, and a file only
/// matches as the final segment.
pub fn resolve_path(
    store: &NodeStore,
    current: Option<&str>,
    path: &str,
    root_label: &str,
) -> Resolved {
    let (mut cursor, rest): (FolderRef, &str) = match strip_root_marker(path, root_label) {
        Some(rest) => (None, rest),
        None => (current.map(str::to_string), path),
    };

    let segments: Vec<&str> = rest.split(is_separator).filter(|s| !s.is_empty()).collect();
    for (index, segment) in segments.iter().enumerate() {
        match *segment {
            "." => continue,
            ".." => {
                if let Some(id) = cursor.take() {
                    cursor = store.folder_by_id(&id).and_then(|f| f.parent_id.clone());
                }
                continue;
            }
            name => {
                if let Some(folder) = store
                    .folders_in_folder(cursor.as_deref())
                    .into_iter()
                    .find(|f| f.name == name)
                {
                    cursor = Some(folder.id.clone());
                    continue;
                }
                if index == segments.len() - 1 {
                    if let Some(file) = store
                        .files_in_folder(cursor.as_deref())
                        .into_iter()
                        .find(|f| f.name == name)
                    {
                        return Resolved::File(file.id.clone());
                    }
                }
                return Resolved::NotFound;
            }
        }
    }
    Resolved::Folder(cursor)
}

/// Display path of a folder: `C:\` for the root, `C:\A\B\` below it.
pub fn display_path(store: &NodeStore, folder: Option<&str>, root_label: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut cursor = folder;
    while let Some(id) = cursor {
        if !seen.insert(id) {
            break;
        }
        match store.folder_by_id(id) {
            Some(node) => {
                parts.push(&node.name);
                cursor = node.parent_id.as_deref();
            }
            None => break,
        }
    }
    parts.reverse();

    if parts.is_empty() {
        format!("{}\\", root_label)
    } else {
        format!("{}\\{}\\", root_label, parts.join("\\"))
    }
}

/// Split a creation target into its parent path and leaf name.
///
/// Trailing separators are ignored. The parent keeps its trailing separator so
/// `/x` parents to the root rather than the current folder.
pub fn split_parent(path: &str) -> (Option<&str>, &str) {
    let trimmed = path.trim_end_matches(is_separator);
    match trimmed.rfind(is_separator) {
        Some(index) => (Some(&trimmed[..=index]), &trimmed[index + 1..]),
        None => (None, trimmed),
    }
}

/// Final segment of a path
pub fn base_name(path: &str) -> &str {
    split_parent(path).1
}
