//! ConfigLoader: assembles the layered sources into a validated `StanzaConfig`.

use super::merge::merge_policy;
use super::sources::{environment, explicit_file, global_file};
use super::StanzaConfig;
use crate::error::ConsoleError;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file, `explicit` (if given) and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<StanzaConfig, ConsoleError> {
        let global = global_file::global_config_path();
        Self::load_layers(global.as_deref(), explicit)
    }

    /// Load defaults, a single config file and the environment.
    pub fn load_from_file(path: &Path) -> Result<StanzaConfig, ConsoleError> {
        Self::load_layers(None, Some(path))
    }

    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<StanzaConfig, ConsoleError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder, global)?;
        if let Some(path) = explicit {
            debug!(config_path = %path.display(), "Loading configuration file");
            builder = explicit_file::add_to_builder(builder, path)?;
        }
        builder = environment::add_to_builder(builder);

        let config: StanzaConfig = builder.build()?.try_deserialize()?;
        if let Err(errors) = config.validate() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(ConsoleError::Config(messages.join("; ")));
        }
        Ok(config)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
