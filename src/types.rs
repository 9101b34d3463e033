//! Core types shared across the store, resolver, and interpreter.

/// NodeId: opaque identifier of a file or folder record
pub type NodeId = String;

/// FolderRef: a folder reference where `None` is the root
pub type FolderRef = Option<NodeId>;

/// Default display label for the root folder
pub const DEFAULT_ROOT_LABEL: &str = "C:";
