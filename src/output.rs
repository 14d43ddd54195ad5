//! Output Façade
//!
//! Routes a structured document to one of the output renderers. The document
//! is the universal intermediate representation of a result: a YAML stream
//! (JSON documents are accepted as a subset).
//!
//! Each `Mode` maps to exactly one renderer function through `renderer_for`.
//! New output modes are added by extending `Mode` and that table.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod batch;
pub mod literal;
pub mod node;
pub mod table;

/// Output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Pass the document through unchanged
    #[default]
    Yaml,
    /// Script-literal expression
    Lua,
    /// Aligned table
    Table,
    /// Aligned table with rows and columns swapped
    #[serde(rename = "ttable")]
    TTable,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Yaml => "yaml",
            Mode::Lua => "lua",
            Mode::Table => "table",
            Mode::TTable => "ttable",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yaml" => Ok(Mode::Yaml),
            "lua" => Ok(Mode::Lua),
            "table" => Ok(Mode::Table),
            "ttable" => Ok(Mode::TTable),
            other => Err(format!(
                "unknown output mode '{}' (expected yaml, lua, table or ttable)",
                other
            )),
        }
    }
}

/// Visual table style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Default,
    Markdown,
    Jira,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Default => "default",
            Dialect::Markdown => "markdown",
            Dialect::Jira => "jira",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Dialect::Default),
            "markdown" => Ok(Dialect::Markdown),
            "jira" => Ok(Dialect::Jira),
            other => Err(format!(
                "unknown table format '{}' (expected default, markdown or jira)",
                other
            )),
        }
    }
}

/// Rendering options shared by all table dialects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opts {
    /// Draw box graphics around tables
    pub graphics: bool,
    /// Maximum cell width in characters (0 = unlimited)
    pub column_width_max: usize,
    /// Table dialect
    pub dialect: Dialect,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            graphics: true,
            column_width_max: 0,
            dialect: Dialect::Default,
        }
    }
}

/// Output format: mode plus rendering options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    pub mode: Mode,
    pub opts: Opts,
}

impl Format {
    pub fn new(mode: Mode, opts: Opts) -> Self {
        Self { mode, opts }
    }
}

type Renderer = fn(&str, &Opts) -> Result<String, FormatError>;

fn renderer_for(mode: Mode) -> Renderer {
    match mode {
        Mode::Yaml => render_passthrough,
        Mode::Lua => render_lua,
        Mode::Table => render_table,
        Mode::TTable => render_transposed_table,
    }
}

/// Render a structured document in the given mode.
pub fn render(mode: Mode, document: &str, opts: &Opts) -> Result<String, FormatError> {
    renderer_for(mode)(document, opts)
}

fn render_passthrough(document: &str, _opts: &Opts) -> Result<String, FormatError> {
    Ok(format!("{}\n", document))
}

fn render_lua(document: &str, _opts: &Opts) -> Result<String, FormatError> {
    literal::render_document(document)
}

fn render_table(document: &str, opts: &Opts) -> Result<String, FormatError> {
    table::render_document(document, false, opts)
}

fn render_transposed_table(document: &str, opts: &Opts) -> Result<String, FormatError> {
    table::render_document(document, true, opts)
}
