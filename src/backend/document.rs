//! Document backend: statements are structured documents.
//!
//! Lets the console run standalone as a renderer: a statement is complete
//! once it parses as YAML (or JSON), and executing it echoes the document
//! back through the output façade.

use super::Backend;
use crate::dispatch::Reply;
use crate::error::FormatError;
use crate::output::node;
use tracing::debug;

const TITLE: &str = "stanza";
const EXIT_STATEMENTS: &[&str] = &["exit", "os.exit()"];

#[derive(Debug, Default)]
pub struct DocumentBackend {
    executed: usize,
}

impl DocumentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed(&self) -> usize {
        self.executed
    }
}

/// Normalize a document to a `---` ... `...` stream.
fn normalize(text: &str) -> Result<String, FormatError> {
    let mut out = String::new();
    for value in node::parse_documents(text)? {
        out.push_str("---\n");
        if !value.is_null() {
            let body =
                serde_yaml::to_string(&value).map_err(|e| FormatError::Encode(e.to_string()))?;
            out.push_str(&body);
        }
        out.push_str("...\n");
    }
    if out.is_empty() {
        out.push_str("---\n...\n");
    }
    Ok(out)
}

impl Backend for DocumentBackend {
    fn title(&self) -> String {
        TITLE.to_string()
    }

    fn validate(&mut self, text: &str) -> bool {
        !text.trim().is_empty() && node::parse_documents(text).is_ok()
    }

    fn execute(&mut self, text: &str) -> Option<Reply> {
        let statement = text.trim();
        if EXIT_STATEMENTS.contains(&statement) {
            debug!("Exit statement received");
            return None;
        }

        self.executed += 1;
        Some(match normalize(text) {
            Ok(document) => Reply::document(document),
            Err(e) => Reply::error(e),
        })
    }

    fn complete(&mut self, input: &str) -> Vec<String> {
        let word = input
            .rsplit(|c: char| c.is_whitespace())
            .next()
            .unwrap_or("");
        EXIT_STATEMENTS
            .iter()
            .filter(|s| !word.is_empty() && s.starts_with(word))
            .map(|s| s.to_string())
            .collect()
    }

    fn close(&mut self) {
        debug!(executed = self.executed, "Document backend closed");
    }
}
