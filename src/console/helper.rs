//! Line-editor helper: TAB completion for the interactive console.

use super::commands::{MetaCommands, SharedCommands};
use crate::backend::SharedBackend;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

const WORD_BREAKS: &str = " \t\n(),;=[]{}\"'";

pub struct ConsoleHelper {
    backend: SharedBackend,
    commands: Option<SharedCommands>,
}

impl ConsoleHelper {
    pub fn new(backend: SharedBackend, commands: Option<SharedCommands>) -> Self {
        Self { backend, commands }
    }

    /// Candidates for `input`, routed to the commands for `\` lines.
    pub fn candidates(&self, input: &str) -> Vec<String> {
        match &self.commands {
            Some(commands) if MetaCommands::is_command(input) => commands.borrow().complete(input),
            _ => self.backend.borrow_mut().complete(input),
        }
    }
}

/// Byte offset where the word ending `input` starts.
fn word_start(input: &str) -> usize {
    input
        .char_indices()
        .rev()
        .find(|(_, c)| WORD_BREAKS.contains(*c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

impl Helper for ConsoleHelper {}
impl Validator for ConsoleHelper {}
impl Highlighter for ConsoleHelper {}
impl Hinter for ConsoleHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Completer for ConsoleHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_pos = &line[..pos];
        let start = word_start(line_to_pos);
        let candidates = self
            .candidates(line_to_pos)
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, candidates))
    }
}
