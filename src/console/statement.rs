//! Statement accumulation buffer.

/// Raw text collected for one logical statement.
///
/// A statement is complete when its trailing-whitespace-trimmed text ends
/// with the delimiter (if one is set) and the delimiter-stripped text
/// validates. An empty statement is never complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    text: String,
    live: bool,
    delimiter: String,
}

impl Statement {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            live: false,
            delimiter: delimiter.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True while more input is expected.
    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) {
        self.delimiter = delimiter.into();
    }

    /// Append a raw input line, newline-joined.
    ///
    /// Returns `false` when a whitespace-only line is dropped from an empty buffer.
    pub fn push_line(&mut self, line: &str) -> bool {
        if self.text.is_empty() {
            if line.trim().is_empty() {
                return false;
            }
        } else {
            self.text.push('\n');
        }
        self.text.push_str(line);
        self.live = true;
        true
    }

    /// The text with the delimiter removed, and whether removal succeeded.
    pub fn strip_delimiter(&self) -> (String, bool) {
        let trimmed = self.text.trim_end();
        if self.delimiter.is_empty() {
            return (trimmed.to_string(), true);
        }
        match trimmed.strip_suffix(self.delimiter.as_str()) {
            Some(stripped) => (stripped.to_string(), true),
            None => (trimmed.to_string(), false),
        }
    }

    /// Decide completion. Returns the delimiter-stripped text when complete.
    pub fn complete_with<F>(&mut self, validate: F) -> Option<String>
    where
        F: FnOnce(&str) -> bool,
    {
        if self.text.trim().is_empty() {
            return None;
        }
        let (stripped, delimited) = self.strip_delimiter();
        let complete = delimited && validate(&stripped);
        self.live = !complete;
        complete.then_some(stripped)
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.live = false;
    }
}
