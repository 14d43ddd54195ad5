//! Configuration System
//!
//! Layered configuration for the console. Layers, lowest to highest:
//! built-in defaults, the global file `$XDG_CONFIG_HOME/stanza/config.toml`,
//! an explicit `--config` file, and `STANZA__*` environment variables
//! (`__` separates nesting, e.g. `STANZA__CONSOLE__DELIMITER=";"`).
//! Command-line flags are applied on top by the caller.

use crate::error::ConsoleError;
use crate::logging::LoggingConfig;
use crate::output::{Dialect, Format, Mode, Opts};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanzaConfig {
    /// Console and rendering settings
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Statement delimiter; empty leaves completion to backend validation
    #[serde(default)]
    pub delimiter: String,

    /// Output mode name: yaml, lua, table, ttable
    #[serde(default = "default_output")]
    pub output: String,

    /// Table dialect name: default, markdown, jira
    #[serde(default = "default_table_format")]
    pub table_format: String,

    /// Boxed table borders
    #[serde(default = "default_true")]
    pub graphics: bool,

    /// Wrap table cells wider than this many characters (0 = unlimited)
    #[serde(default)]
    pub column_width_max: usize,

    /// History file (defaults to `$XDG_DATA_HOME/stanza/history`)
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries kept
    #[serde(default = "default_max_commands")]
    pub max_commands: usize,
}

fn default_output() -> String {
    Mode::default().as_str().to_string()
}

fn default_table_format() -> String {
    Dialect::default().as_str().to_string()
}

fn default_true() -> bool {
    true
}

pub(crate) fn default_max_commands() -> usize {
    10_000
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            delimiter: String::new(),
            output: default_output(),
            table_format: default_table_format(),
            graphics: default_true(),
            column_width_max: 0,
            history_file: None,
            max_commands: default_max_commands(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Console(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Console(msg) => write!(f, "console: {}", msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ConsoleConfig {
    pub fn mode(&self) -> Result<Mode, ConsoleError> {
        self.output.parse().map_err(ConsoleError::Config)
    }

    pub fn dialect(&self) -> Result<Dialect, ConsoleError> {
        self.table_format.parse().map_err(ConsoleError::Config)
    }

    /// The initial output format for a session.
    pub fn format(&self) -> Result<Format, ConsoleError> {
        Ok(Format::new(
            self.mode()?,
            Opts {
                graphics: self.graphics,
                column_width_max: self.column_width_max,
                dialect: self.dialect()?,
            },
        ))
    }

    /// Configured history file, else the per-user data directory default.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(sources::global_file::default_history_path)
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.max_commands == 0 {
            errors.push(ValidationError::Console(
                "max_commands must be greater than 0".to_string(),
            ));
        }
        if let Err(e) = self.output.parse::<Mode>() {
            errors.push(ValidationError::Console(e));
        }
        if let Err(e) = self.table_format.parse::<Dialect>() {
            errors.push(ValidationError::Console(e));
        }
        errors
    }
}

impl StanzaConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = self.console.validate();

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(ValidationError::Logging(format!(
                "invalid format '{}'",
                self.logging.format
            )));
        }
        if !matches!(self.logging.output.as_str(), "stderr" | "stdout" | "file") {
            errors.push(ValidationError::Logging(format!(
                "invalid output '{}'",
                self.logging.output
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
