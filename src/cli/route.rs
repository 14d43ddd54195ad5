//! CLI route: run context. Resolves configuration and wires the console.

use crate::backend::SharedBackend;
use crate::cli::parse::Cli;
use crate::config::{ConfigLoader, ConsoleConfig, StanzaConfig};
use crate::console::commands::{MetaCommands, SharedCommands};
use crate::console::{Console, SessionEnd, Settings};
use crate::error::ConsoleError;
use crate::history::{CommandsHistory, History, MemoryHistory};
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{info, warn};

/// Runtime context for a console session: resolved config plus input source.
#[derive(Debug)]
pub struct RunContext {
    config: StanzaConfig,
    input: Option<PathBuf>,
    no_history: bool,
}

impl RunContext {
    /// Load layered configuration and apply command-line overrides.
    pub fn new(cli: &Cli) -> Result<Self, ConsoleError> {
        let mut config = ConfigLoader::load(cli.config.as_deref())?;
        apply_overrides(&mut config.console, cli);
        if let Err(errors) = config.validate() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(ConsoleError::Config(messages.join("; ")));
        }
        Ok(Self::from_config(config, cli.file.clone(), cli.no_history))
    }

    pub fn from_config(config: StanzaConfig, input: Option<PathBuf>, no_history: bool) -> Self {
        Self {
            config,
            input,
            no_history,
        }
    }

    pub fn config(&self) -> &StanzaConfig {
        &self.config
    }

    fn open_history(&self) -> Result<Box<dyn History>, ConsoleError> {
        let console = &self.config.console;
        if self.no_history {
            return Ok(Box::new(MemoryHistory::new(console.max_commands)));
        }
        match console.history_path() {
            Some(path) => {
                info!(path = %path.display(), "Using history file");
                Ok(Box::new(CommandsHistory::open(path, console.max_commands)?))
            }
            None => {
                warn!("No home directory for the history file, keeping history in memory");
                Ok(Box::new(MemoryHistory::new(console.max_commands)))
            }
        }
    }

    /// Build a console over `backend` with the configured settings.
    pub fn console(&self, backend: SharedBackend) -> Result<Console, ConsoleError> {
        let console = &self.config.console;
        let settings = Settings::new(console.format()?, console.delimiter.clone());
        let commands: SharedCommands = Rc::new(RefCell::new(MetaCommands::new()));
        Ok(Console::new(backend, self.open_history()?, settings).with_commands(commands))
    }

    /// Run a session: interactive on a terminal, piped otherwise.
    pub fn run(&self, backend: SharedBackend) -> Result<SessionEnd, ConsoleError> {
        let mut console = self.console(backend)?;
        let stdout = io::stdout();
        let result = match &self.input {
            Some(path) => match File::open(path) {
                Ok(file) => console.run_pipe(BufReader::new(file), &mut stdout.lock()),
                Err(e) => Err(ConsoleError::Input(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                ))),
            },
            None if io::stdin().is_terminal() => console.run_interactive(),
            None => console.run_pipe(io::stdin().lock(), &mut stdout.lock()),
        };
        console.close();
        result
    }
}

fn apply_overrides(console: &mut ConsoleConfig, cli: &Cli) {
    if let Some(mode) = cli.output {
        console.output = mode.as_str().to_string();
    }
    if let Some(dialect) = cli.table_format {
        console.table_format = dialect.as_str().to_string();
    }
    if cli.no_graphics {
        console.graphics = false;
    }
    if let Some(width) = cli.column_width_max {
        console.column_width_max = width;
    }
    if let Some(ref delimiter) = cli.delimiter {
        console.delimiter = delimiter.clone();
    }
    if let Some(ref path) = cli.history_file {
        console.history_file = Some(path.clone());
    }
}
