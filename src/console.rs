//! Statement Console
//!
//! Turns line-oriented input into complete statements and dispatches them to
//! a backend. Per input line:
//!
//! 1. With an empty buffer, embedded commands get the first look at the line.
//! 2. Otherwise the line is appended to the [`Statement`].
//! 3. A statement is complete once its delimiter is present (if any) and the
//!    backend validates the delimiter-stripped text.
//! 4. A complete statement is recorded in history, executed, and the reply is
//!    rendered through [`crate::dispatch::sprint`]. A missing reply ends the
//!    session.
//!
//! Piped and interactive sources share [`Console::handle_line`], so both
//! observe the same completion rules.

pub mod commands;
pub mod helper;
pub mod statement;

use crate::backend::SharedBackend;
use crate::dispatch::{sprint, Reply};
use crate::error::ConsoleError;
use crate::history::History;
use crate::output::Format;
use commands::{CommandOutcome, SharedCommands};
use helper::ConsoleHelper;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use statement::Statement;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};

/// Mutable per-session presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub format: Format,
    pub delimiter: String,
}

impl Settings {
    pub fn new(format: Format, delimiter: impl Into<String>) -> Self {
        Self {
            format,
            delimiter: delimiter.into(),
        }
    }
}

/// What a single input line led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Buffered (or dropped); more input is expected.
    Pending,
    /// A statement ran; carries the text recorded in history.
    Executed(String),
    /// An embedded command ran.
    Command,
    Quit,
    /// The backend returned no reply.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    EndOfInput,
    Quit,
    BackendClosed,
}

pub struct Console {
    backend: SharedBackend,
    history: Box<dyn History>,
    commands: Option<SharedCommands>,
    statement: Statement,
    settings: Settings,
    title: String,
}

impl Console {
    pub fn new(backend: SharedBackend, history: Box<dyn History>, settings: Settings) -> Self {
        let title = backend.borrow().title();
        Self {
            backend,
            history,
            commands: None,
            statement: Statement::new(settings.delimiter.clone()),
            settings,
            title,
        }
    }

    pub fn with_commands(mut self, commands: SharedCommands) -> Self {
        self.commands = Some(commands);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    pub fn prompt(&self) -> String {
        if self.statement.is_live() {
            let width = self.title.chars().count().max(3);
            format!("{:>width$}> ", "...", width = width)
        } else {
            format!("{}> ", self.title)
        }
    }

    /// Discard the statement being accumulated.
    pub fn interrupt(&mut self) {
        if !self.statement.is_empty() {
            debug!("Statement discarded");
        }
        self.statement.reset();
    }

    /// Feed one raw input line through the state machine.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Step, ConsoleError> {
        if self.statement.is_empty() {
            if let Some(commands) = &self.commands {
                let outcome = commands.borrow_mut().execute(line, &mut self.settings);
                if let Some(outcome) = outcome {
                    self.statement.set_delimiter(self.settings.delimiter.clone());
                    return self.apply_outcome(outcome, out);
                }
            }
        }

        if !self.statement.push_line(line) {
            return Ok(Step::Pending);
        }

        let backend = &self.backend;
        let Some(text) = self
            .statement
            .complete_with(|text| backend.borrow_mut().validate(text))
        else {
            debug!("Statement incomplete, awaiting more input");
            return Ok(Step::Pending);
        };

        let recorded = self.statement.text().trim().to_string();
        if let Err(e) = self.history.append_command(&recorded) {
            warn!(error = %e, "Failed to record statement in history");
        }

        debug!(statement = %text, "Executing statement");
        let reply = self.backend.borrow_mut().execute(&text);
        self.statement.reset();

        match reply {
            Some(reply) => {
                self.print_reply(&reply, out)?;
                Ok(Step::Executed(recorded))
            }
            None => {
                info!(title = %self.title, "Backend ended the session");
                Ok(Step::Closed)
            }
        }
    }

    fn apply_outcome<W: Write>(
        &mut self,
        outcome: CommandOutcome,
        out: &mut W,
    ) -> Result<Step, ConsoleError> {
        match outcome {
            CommandOutcome::Output(text) => write_result(out, &text)?,
            CommandOutcome::Error(msg) => write_result(out, &format!("Error: {}", msg))?,
            CommandOutcome::Continue => {}
            CommandOutcome::Quit => return Ok(Step::Quit),
        }
        Ok(Step::Command)
    }

    fn print_reply<W: Write>(&self, reply: &Reply, out: &mut W) -> Result<(), ConsoleError> {
        match sprint(reply, &self.settings.format) {
            Ok(text) => write_result(out, &text),
            Err(e) => {
                error!(error = %e, "Failed to render result");
                write_result(out, &format!("{:?}", reply))
            }
        }
    }

    /// Run over a line stream until it ends, the user quits, or the backend closes.
    pub fn run_pipe<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<SessionEnd, ConsoleError> {
        info!(title = %self.title, "Piped session started");
        for line in input.lines() {
            let line = line?;
            match self.handle_line(&line, out)? {
                Step::Quit => return Ok(SessionEnd::Quit),
                Step::Closed => return Ok(SessionEnd::BackendClosed),
                Step::Pending | Step::Executed(_) | Step::Command => {}
            }
        }

        if !self.statement.is_empty() {
            warn!(statement = %self.statement.text(), "Discarding incomplete statement at end of input");
            self.statement.reset();
        }
        Ok(SessionEnd::EndOfInput)
    }

    /// Run an interactive session on the terminal.
    pub fn run_interactive(&mut self) -> Result<SessionEnd, ConsoleError> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();
        let mut editor: Editor<ConsoleHelper, DefaultHistory> = Editor::with_config(config)?;
        editor.set_helper(Some(ConsoleHelper::new(
            self.backend.clone(),
            self.commands.clone(),
        )));
        for command in self.history.commands() {
            if let Err(e) = editor.add_history_entry(command) {
                debug!(error = %e, "Failed to seed line editor history");
            }
        }

        info!(title = %self.title, "Interactive session started");
        let stdout = io::stdout();
        loop {
            let prompt = self.prompt();
            match editor.readline(&prompt) {
                Ok(line) => {
                    let mut out = stdout.lock();
                    match self.handle_line(&line, &mut out)? {
                        Step::Executed(recorded) => recall(&mut editor, &recorded),
                        Step::Command => recall(&mut editor, line.trim()),
                        Step::Quit => return Ok(SessionEnd::Quit),
                        Step::Closed => return Ok(SessionEnd::BackendClosed),
                        Step::Pending => {}
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    self.interrupt();
                }
                Err(ReadlineError::Eof) => return Ok(SessionEnd::EndOfInput),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Release the backend and history.
    pub fn close(&mut self) {
        self.backend.borrow_mut().close();
        if let Err(e) = self.history.close() {
            warn!(error = %e, "Failed to close history");
        }
        info!(title = %self.title, "Session closed");
    }
}

fn write_result<W: Write>(out: &mut W, text: &str) -> Result<(), ConsoleError> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Add an entry to the line editor's recall list.
fn recall(editor: &mut Editor<ConsoleHelper, DefaultHistory>, entry: &str) {
    if let Err(e) = editor.add_history_entry(entry) {
        debug!(error = %e, "Failed to add line editor history entry");
    }
}
