//! Backend capability set consumed by the console.
//!
//! A backend validates and executes statements. It is shared with the line
//! editor helper for completion, so the console holds it as `SharedBackend`.

use crate::dispatch::Reply;
use std::cell::RefCell;
use std::rc::Rc;

mod document;

pub use document::DocumentBackend;

pub trait Backend {
    /// Session label used for the prompt and log lines.
    fn title(&self) -> String;

    /// Whether `text` is a complete, executable statement.
    fn validate(&mut self, text: &str) -> bool;

    /// Run a statement. `None` ends the session.
    fn execute(&mut self, text: &str) -> Option<Reply>;

    /// Completion candidates for the word ending `input`.
    fn complete(&mut self, input: &str) -> Vec<String>;

    fn close(&mut self);
}

pub type SharedBackend = Rc<RefCell<dyn Backend>>;

/// Wrap a backend for sharing between the console and the line editor.
pub fn shared<B: Backend + 'static>(backend: B) -> SharedBackend {
    Rc::new(RefCell::new(backend))
}
