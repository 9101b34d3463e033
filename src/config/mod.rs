//! Configuration
//!
//! Layered configuration for the shell session, storage, and logging. Sources
//! are merged by [`ConfigLoader`]; every field has a serde default so an empty
//! or partial file is valid.

pub mod loader;
pub mod xdg;

pub use loader::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::store::{FileBackend, KeyValueBackend, MemoryBackend};
use crate::types::DEFAULT_ROOT_LABEL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TalosConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Interpreter session identity and presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// User name shown in the prompt and by `whoami`
    #[serde(default = "default_user")]
    pub user: String,

    /// Host name shown in the prompt
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Label rendered in front of every absolute path
    #[serde(default = "default_root_label")]
    pub root_label: String,

    /// Application the host opens files in
    #[serde(default = "default_editor_app")]
    pub editor_app: String,

    /// Delay between `exit` and the close request
    #[serde(default = "default_exit_delay_ms")]
    pub exit_delay_ms: u64,
}

fn default_user() -> String {
    "admin".to_string()
}

fn default_hostname() -> String {
    "talos".to_string()
}

fn default_root_label() -> String {
    DEFAULT_ROOT_LABEL.to_string()
}

fn default_editor_app() -> String {
    "notepad".to_string()
}

fn default_exit_delay_ms() -> u64 {
    500
}

impl SessionConfig {
    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            hostname: default_hostname(),
            root_label: default_root_label(),
            editor_app: default_editor_app(),
            exit_delay_ms: default_exit_delay_ms(),
        }
    }
}

/// Which backend the store writes through to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    File,
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,

    /// Directory for the file backend; None means the platform data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_backend() -> BackendKind {
    BackendKind::File
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: None,
        }
    }
}

impl StorageConfig {
    /// Resolve the data directory, falling back to the platform default.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ApiError> {
        match &self.data_dir {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.clone()),
            _ => xdg::default_data_dir(),
        }
    }

    /// Construct the configured backend.
    pub fn open_backend(&self) -> Result<Box<dyn KeyValueBackend>, ApiError> {
        match self.backend {
            BackendKind::Memory => Ok(Box::new(MemoryBackend::new())),
            BackendKind::File => {
                let dir = self.resolve_data_dir()?;
                Ok(Box::new(FileBackend::open(dir)?))
            }
        }
    }
}
