//! Embedded backslash commands.
//!
//! Consulted only while the statement buffer is empty. They adjust the
//! session settings without reaching the backend.

use super::Settings;
use crate::output::{Dialect, Mode};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Output(String),
    Continue,
    Quit,
    Error(String),
}

/// Session-local command handler.
pub trait EmbeddedCommands {
    /// Run `line` if it is a command. `None` hands the line to the statement buffer.
    fn execute(&mut self, line: &str, settings: &mut Settings) -> Option<CommandOutcome>;

    /// Completion candidates for the word ending `input`.
    fn complete(&self, input: &str) -> Vec<String>;
}

pub type SharedCommands = Rc<RefCell<dyn EmbeddedCommands>>;

const COMMANDS: &[&str] = &[
    "\\q", "\\quit", "\\help", "\\?", "\\set", "\\xy", "\\xl", "\\xt", "\\xT", "\\xw",
];

const SETTINGS: &[&str] = &[
    "output",
    "table_format",
    "graphics",
    "table_column_width_max",
    "delimiter",
];

const MODES: &[&str] = &["yaml", "lua", "table", "ttable"];
const DIALECTS: &[&str] = &["default", "markdown", "jira"];
const BOOLEANS: &[&str] = &["true", "false"];

/// Built-in `\`-prefixed meta-commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaCommands;

impl MetaCommands {
    pub fn new() -> Self {
        Self
    }

    pub fn is_command(input: &str) -> bool {
        input.trim_start().starts_with('\\')
    }
}

impl EmbeddedCommands for MetaCommands {
    fn execute(&mut self, line: &str, settings: &mut Settings) -> Option<CommandOutcome> {
        if !Self::is_command(line) {
            return None;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (cmd, args) = parts.split_first()?;

        let outcome = match *cmd {
            "\\q" | "\\quit" => CommandOutcome::Quit,
            "\\help" | "\\?" => CommandOutcome::Output(help_text()),
            "\\set" => set(settings, args),
            "\\xy" => set_mode(settings, Mode::Yaml),
            "\\xl" => set_mode(settings, Mode::Lua),
            "\\xt" => set_mode(settings, Mode::Table),
            "\\xT" => set_mode(settings, Mode::TTable),
            "\\xw" => match args.first() {
                Some(value) => set_width(settings, value),
                None => CommandOutcome::Error("Usage: \\xw <width>".to_string()),
            },
            other => CommandOutcome::Error(format!(
                "Unknown command: {}. Type \\help for available commands.",
                other
            )),
        };
        Some(outcome)
    }

    fn complete(&self, input: &str) -> Vec<String> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let trailing_space = input.ends_with(char::is_whitespace);

        let (pool, prefix): (&[&str], &str) = match (parts.as_slice(), trailing_space) {
            ([], _) => (COMMANDS, ""),
            ([cmd], false) => (COMMANDS, *cmd),
            (["\\set"], true) => (SETTINGS, ""),
            (["\\set", key], false) => (SETTINGS, *key),
            (["\\set", key], true) => (values_for(key), ""),
            (["\\set", key, value], false) => (values_for(key), *value),
            _ => return Vec::new(),
        };

        pool.iter()
            .filter(|candidate| candidate.starts_with(prefix))
            .map(|candidate| candidate.to_string())
            .collect()
    }
}

fn values_for(key: &str) -> &'static [&'static str] {
    match key {
        "output" => MODES,
        "table_format" => DIALECTS,
        "graphics" => BOOLEANS,
        _ => &[],
    }
}

fn set(settings: &mut Settings, args: &[&str]) -> CommandOutcome {
    let Some((key, rest)) = args.split_first() else {
        return CommandOutcome::Output(describe(settings));
    };
    let value = rest.join(" ");

    match *key {
        "output" => match value.parse::<Mode>() {
            Ok(mode) => set_mode(settings, mode),
            Err(e) => CommandOutcome::Error(e),
        },
        "table_format" => match value.parse::<Dialect>() {
            Ok(dialect) => {
                settings.format.opts.dialect = dialect;
                CommandOutcome::Continue
            }
            Err(e) => CommandOutcome::Error(e),
        },
        "graphics" => match value.as_str() {
            "true" => {
                settings.format.opts.graphics = true;
                CommandOutcome::Continue
            }
            "false" => {
                settings.format.opts.graphics = false;
                CommandOutcome::Continue
            }
            other => CommandOutcome::Error(format!("Invalid boolean: '{}'", other)),
        },
        "table_column_width_max" => set_width(settings, &value),
        "delimiter" => {
            settings.delimiter = value;
            CommandOutcome::Continue
        }
        other => CommandOutcome::Error(format!("Unknown setting: {}", other)),
    }
}

fn set_mode(settings: &mut Settings, mode: Mode) -> CommandOutcome {
    settings.format.mode = mode;
    CommandOutcome::Continue
}

fn set_width(settings: &mut Settings, value: &str) -> CommandOutcome {
    match value.parse::<usize>() {
        Ok(width) => {
            settings.format.opts.column_width_max = width;
            CommandOutcome::Continue
        }
        Err(_) => CommandOutcome::Error(format!("Invalid width: '{}'", value)),
    }
}

fn describe(settings: &Settings) -> String {
    let opts = &settings.format.opts;
    format!(
        "output = {}\ntable_format = {}\ngraphics = {}\ntable_column_width_max = {}\ndelimiter = {:?}",
        settings.format.mode,
        opts.dialect,
        opts.graphics,
        opts.column_width_max,
        settings.delimiter
    )
}

fn help_text() -> String {
    r#"Session commands:

  \q, \quit                          End the session
  \help, \?                          Show this help message
  \set                               Show current settings
  \set output <mode>                 yaml, lua, table or ttable
  \set table_format <dialect>        default, markdown or jira
  \set graphics <true|false>         Boxed table borders
  \set table_column_width_max <n>    Wrap cells wider than n (0 = off)
  \set delimiter [<text>]            Statement terminator (empty = none)
  \xy, \xl, \xt, \xT                 Output as yaml, lua, table, ttable
  \xw <n>                            Same as table_column_width_max

Commands are recognized only at the start of a statement.
Use Ctrl+C to discard a multi-line statement, Ctrl+D to exit."#
        .to_string()
}
