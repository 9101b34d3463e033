//! Error types for the store, the interpreter, and the CLI layer.

use thiserror::Error;

/// Errors raised by the node store and its persistence backends.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent folder not found: {0}")]
    ParentNotFound(String),

    #[error("Invalid node name: '{0}'")]
    InvalidName(String),

    #[error("A node named '{name}' already exists in {parent}")]
    NameConflict { name: String, parent: String },

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Errors produced by a single interpreter command.
///
/// Every variant is recovered at the command boundary and turned into one
/// error line; the message is the full line text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidOperation(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    NotImplemented(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors surfaced by configuration, logging, and CLI tooling.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
