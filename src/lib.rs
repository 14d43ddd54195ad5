//! Stanza: Interactive Statement Console
//!
//! Assembles line-oriented input into complete statements, hands them to a
//! pluggable backend, and renders the results as YAML, Lua literals, or
//! tables in several dialects.

pub mod backend;
pub mod cli;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod logging;
pub mod output;
