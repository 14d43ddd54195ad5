//! Shared test utilities for integration tests
//!
//! A scripted backend for driving the console, plus XDG environment
//! isolation for tests that resolve per-user paths.

use stanza::backend::{self, Backend, SharedBackend};
use stanza::console::commands::{MetaCommands, SharedCommands};
use stanza::console::{Console, SessionEnd, Settings};
use stanza::dispatch::Reply;
use stanza::history::History;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
    xdg_data_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
            xdg_data_home: std::env::var("XDG_DATA_HOME").ok(),
        }
    }

    fn restore(self) {
        restore_var("HOME", self.home);
        restore_var("XDG_CONFIG_HOME", self.xdg_config_home);
        restore_var("XDG_DATA_HOME", self.xdg_data_home);
    }
}

fn restore_var(key: &str, value: Option<String>) {
    match value {
        Some(orig) => std::env::set_var(key, orig),
        None => std::env::remove_var(key),
    }
}

/// Run `f` with HOME, XDG_CONFIG_HOME and XDG_DATA_HOME inside `test_dir`.
///
/// Config lives in `<test_dir>/config`, data in `<test_dir>/data`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_data_home = test_dir.path().join("data");
    let test_home = test_dir.path().join("home");

    std::fs::create_dir_all(&test_config_home).unwrap();
    std::fs::create_dir_all(&test_data_home).unwrap();
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());
    std::env::set_var("XDG_DATA_HOME", test_data_home.to_str().unwrap());

    let result = f();

    env_state.restore();

    result
}

/// Backend that accepts statements with balanced parentheses.
///
/// Statements: `quit` ends the session, `fail` returns an error value,
/// `rows` returns a two-row document, `opaque` returns an unprintable
/// value. Anything else is echoed back as `ok: <text>`.
pub struct ScriptedBackend {
    executed: Rc<RefCell<Vec<String>>>,
    closed: Rc<RefCell<bool>>,
}

pub const ROWS_DOCUMENT: &str =
    "---\n- {field1: value11, field2: value12}\n- {field1: value21, field2: value22}\n...\n";

impl ScriptedBackend {
    pub fn new() -> (Self, Rc<RefCell<Vec<String>>>, Rc<RefCell<bool>>) {
        let executed = Rc::new(RefCell::new(Vec::new()));
        let closed = Rc::new(RefCell::new(false));
        (
            Self {
                executed: Rc::clone(&executed),
                closed: Rc::clone(&closed),
            },
            executed,
            closed,
        )
    }
}

impl Backend for ScriptedBackend {
    fn title(&self) -> String {
        "scripted".to_string()
    }

    fn validate(&mut self, text: &str) -> bool {
        let mut depth = 0i32;
        for c in text.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0 && !text.trim().is_empty()
    }

    fn execute(&mut self, text: &str) -> Option<Reply> {
        let statement = text.trim().to_string();
        self.executed.borrow_mut().push(statement.clone());
        match statement.as_str() {
            "quit" => None,
            "fail" => Some(Reply::error(io::Error::new(
                io::ErrorKind::Other,
                "statement failed",
            ))),
            "rows" => Some(Reply::document(ROWS_DOCUMENT)),
            "opaque" => Some(Reply::opaque(vec![1u8, 2, 3])),
            other => Some(Reply::text(format!("ok: {}", other))),
        }
    }

    fn complete(&mut self, input: &str) -> Vec<String> {
        ["quit", "rows"]
            .iter()
            .filter(|c| c.starts_with(input.trim()))
            .map(|c| c.to_string())
            .collect()
    }

    fn close(&mut self) {
        *self.closed.borrow_mut() = true;
    }
}

/// Outcome of a piped session.
pub struct SessionRun {
    pub end: SessionEnd,
    pub output: String,
    pub executed: Vec<String>,
    pub closed: bool,
}

/// Build a console over the scripted backend with meta-commands enabled.
pub fn scripted_console(
    history: Box<dyn History>,
    settings: Settings,
) -> (Console, Rc<RefCell<Vec<String>>>, Rc<RefCell<bool>>) {
    let (scripted, executed, closed) = ScriptedBackend::new();
    let backend: SharedBackend = backend::shared(scripted);
    let commands: SharedCommands = Rc::new(RefCell::new(MetaCommands::new()));
    let console = Console::new(backend, history, settings).with_commands(commands);
    (console, executed, closed)
}

/// Run `input` through a piped session and close the console.
pub fn run_piped(history: Box<dyn History>, settings: Settings, input: &str) -> SessionRun {
    let (mut console, executed, closed) = scripted_console(history, settings);
    let mut out = Vec::new();
    let end = console.run_pipe(input.as_bytes(), &mut out).unwrap();
    console.close();
    let executed = executed.borrow().clone();
    let closed = *closed.borrow();
    SessionRun {
        end,
        output: String::from_utf8(out).unwrap(),
        executed,
        closed,
    }
}
