//! CLI Tooling
//!
//! Command-line interface for the Talos filesystem shell. Every subcommand
//! runs against one store opened from the effective configuration.

use crate::config::{BackendKind, ConfigLoader, TalosConfig};
use crate::error::{ApiError, StorageError};
use crate::shell::{NullHost, OutputLine, Shell};
use crate::store::{NodeStore, StoreHandle};
use crate::tooling::render::{format_section_heading, key_value_table, render_lines};
use crate::tooling::repl::Repl;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;

/// Talos - virtual filesystem shell
#[derive(Parser, Debug)]
#[command(name = "talos")]
#[command(about = "Virtual filesystem shell with a persistent node store")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (layered over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory for the file backend
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep the filesystem in memory only
    #[arg(long, global = true)]
    pub memory: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Run command lines non-interactively and print their output
    Exec {
        /// Command lines, one per argument
        #[arg(required = true)]
        lines: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show store status
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print both collections as JSON
    Export,
    /// Replace the stored filesystem with the seed data
    Reset,
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

impl Cli {
    /// Subcommand to run; `shell` when none was given.
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Shell)
    }

    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<TalosConfig, ApiError> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Command-line flags take precedence over every config source.
    pub fn apply_overrides(&self, config: &mut TalosConfig) {
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        if self.memory {
            config.storage.backend = BackendKind::Memory;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

/// CLI context for executing commands
pub struct CliContext {
    config: TalosConfig,
    store: StoreHandle,
}

impl CliContext {
    /// Open the configured backend and rehydrate the store from it.
    pub fn new(config: TalosConfig) -> Result<Self, ApiError> {
        let backend = config.storage.open_backend()?;
        let store = StoreHandle::new(NodeStore::open(backend));
        Ok(Self { config, store })
    }

    /// Context over an existing store
    pub fn with_store(config: TalosConfig, store: StoreHandle) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &TalosConfig {
        &self.config
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Execute a CLI command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Shell => {
                let color = std::io::stdout().is_terminal();
                let mut repl = Repl::new(self.store.clone(), self.config.session.clone(), color);
                repl.run()?;
                Ok(String::new())
            }
            Commands::Exec { lines, format } => self.handle_exec(lines, format),
            Commands::Status { format } => self.handle_status(format),
            Commands::Export => self.handle_export(),
            Commands::Reset => self.handle_reset(),
            Commands::Config {
                command: ConfigCommands::Show,
            } => self.handle_config_show(),
        }
    }

    fn handle_exec(&self, lines: &[String], format: &str) -> Result<String, ApiError> {
        check_format(format)?;
        let mut shell = Shell::new(
            self.store.clone(),
            self.config.session.clone(),
            Box::new(NullHost),
        );
        let mut produced: Vec<OutputLine> = Vec::new();
        for line in lines {
            let execution = shell.execute(line);
            produced.extend(execution.lines);
            if shell.is_exited() {
                break;
            }
        }
        info!(commands = lines.len(), "Executed command lines");

        if format == "json" {
            serde_json::to_string_pretty(&produced)
                .map_err(|e| ApiError::Storage(StorageError::from(e)))
        } else {
            Ok(render_lines(&produced, false))
        }
    }

    fn handle_status(&self, format: &str) -> Result<String, ApiError> {
        check_format(format)?;
        let store = self.store.read();
        let content_bytes: usize = store.files().iter().map(|f| f.size()).sum();
        let root_folders = store.folders_in_folder(None).len();
        let root_files = store.files_in_folder(None).len();

        if format == "json" {
            let status = json!({
                "backend": store.backend_description(),
                "folders": store.folders().len(),
                "files": store.files().len(),
                "content_bytes": content_bytes,
                "root": {
                    "folders": root_folders,
                    "files": root_files,
                },
            });
            return serde_json::to_string_pretty(&status)
                .map_err(|e| ApiError::Storage(StorageError::from(e)));
        }

        let table = key_value_table(
            ["Property", "Value"],
            vec![
                ("Backend".to_string(), store.backend_description()),
                ("Folders".to_string(), store.folders().len().to_string()),
                ("Files".to_string(), store.files().len().to_string()),
                ("Content".to_string(), format!("{}B", content_bytes)),
                (
                    "Root entries".to_string(),
                    format!("{} folders, {} files", root_folders, root_files),
                ),
            ],
        );
        Ok(format!(
            "{}\n\n{}",
            format_section_heading("Filesystem Status"),
            table
        ))
    }

    fn handle_export(&self) -> Result<String, ApiError> {
        let snapshot = self.store.read().snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| ApiError::Storage(StorageError::from(e)))
    }

    fn handle_reset(&self) -> Result<String, ApiError> {
        let mut store = self.store.write();
        store.reset_to_seed()?;
        Ok(format!(
            "Filesystem reset to seed data ({} folders, {} files)",
            store.folders().len(),
            store.files().len()
        ))
    }

    fn handle_config_show(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(&self.config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render configuration: {}", e)))
    }
}

fn check_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::ConfigError(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}
