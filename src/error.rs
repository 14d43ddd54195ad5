//! Error types for the statement console and its rendering engine.

use thiserror::Error;

/// Rendering and encoding errors
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed to decode document: {0}")]
    Decode(String),

    #[error("Cannot format type: {0}")]
    UnsupportedType(String),

    #[error("Failed to encode value: {0}")]
    Encode(String),
}

impl From<serde_yaml::Error> for FormatError {
    fn from(err: serde_yaml::Error) -> Self {
        FormatError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Encode(err.to_string())
    }
}

/// History store errors
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Console session errors
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for ConsoleError {
    fn from(err: config::ConfigError) -> Self {
        ConsoleError::Config(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for ConsoleError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ConsoleError::Input(err.to_string())
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::Input(err.to_string())
    }
}
