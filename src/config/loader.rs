//! ConfigLoader: orchestrates sources and deserializes to TalosConfig.

use super::xdg;
use super::TalosConfig;
use crate::error::ApiError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use std::path::Path;
use tracing::debug;

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    /// Precedence: global file (lowest) -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<TalosConfig, ApiError> {
        let global = match xdg::global_config_file() {
            Ok(global) => Some(global),
            Err(e) => {
                debug!(error = %e, "Skipping global config source");
                None
            }
        };
        Self::load_layers(global.as_deref(), explicit)
    }

    /// Merge the optional global file, the required explicit file, and the
    /// environment overlay.
    fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<TalosConfig, ApiError> {
        let mut builder = Config::builder();
        if let Some(global) = global {
            debug!(path = %global.display(), "Adding global config source");
            builder = builder.add_source(File::from(global).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }
        let builder = Self::add_environment(builder);

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Environment overlay: `TALOS__SECTION__KEY`.
    fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix("TALOS")
                .separator("__")
                .try_parsing(true),
        )
    }
}
