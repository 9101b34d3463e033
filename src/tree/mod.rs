//! Filesystem tree model: node records, identifiers, and path resolution.

pub mod ids;
pub mod node;
pub mod resolver;

pub use node::{FileNode, FolderNode, NodeKind};
pub use resolver::{display_path, resolve_path, Resolved};
