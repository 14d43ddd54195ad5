//! CLI parse: clap types for Stanza. No behavior; definitions only.

use crate::output::{Dialect, Mode};
use clap::Parser;
use std::path::PathBuf;

/// Stanza - interactive statement console
#[derive(Parser, Debug)]
#[command(name = "stanza")]
#[command(about = "Interactive statement console with table, lua and yaml result rendering")]
pub struct Cli {
    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output mode (yaml, lua, table, ttable)
    #[arg(short, long)]
    pub output: Option<Mode>,

    /// Table dialect (default, markdown, jira)
    #[arg(long)]
    pub table_format: Option<Dialect>,

    /// Render tables without borders
    #[arg(long)]
    pub no_graphics: bool,

    /// Wrap table cells wider than N characters (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub column_width_max: Option<usize>,

    /// Statement delimiter (empty = complete on validation alone)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// History file path
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long)]
    pub no_history: bool,

    /// Read statements from a file instead of stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
