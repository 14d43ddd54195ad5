//! Command History
//!
//! Persists completed statements as a capped list of timestamped entries.
//!
//! ## File Format
//!
//! ```text
//! #1700000000
//! select 1;
//! #1700000042
//! select *
//! from t;
//! ```
//!
//! Each entry is a `#<unix-seconds>` header followed by the command text,
//! which may span several lines. Files without any header line are read in
//! the legacy format: one command per line, stamped with the load time.
//!
//! The whole file is rewritten on every append.

use crate::error::HistoryError;
use chrono::Utc;
use std::collections::VecDeque;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// History capability consumed by the console
pub trait History {
    fn append_command(&mut self, text: &str) -> Result<(), HistoryError>;
    fn commands(&self) -> Vec<String>;
    fn close(&mut self) -> Result<(), HistoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: i64,
    pub command: String,
}

impl HistoryEntry {
    pub fn now(command: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().timestamp(),
            command: command.into(),
        }
    }
}

fn parse_header(line: &str) -> Option<i64> {
    let digits = line.strip_prefix('#')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn push_capped(entries: &mut VecDeque<HistoryEntry>, entry: HistoryEntry, max: usize) {
    entries.push_back(entry);
    while entries.len() > max {
        entries.pop_front();
    }
}

/// Parse history file content, keeping at most `max_commands` entries.
pub fn parse_entries(content: &str, max_commands: usize) -> VecDeque<HistoryEntry> {
    let lines: Vec<&str> = content.lines().collect();
    let window = &lines[lines.len().saturating_sub(max_commands)..];
    let mut entries = VecDeque::new();

    if !window.iter().any(|line| parse_header(line).is_some()) {
        let now = Utc::now().timestamp();
        for line in window {
            push_capped(
                &mut entries,
                HistoryEntry {
                    timestamp: now,
                    command: line.to_string(),
                },
                max_commands,
            );
        }
        return entries;
    }

    // Lines before the first header belong to an entry cut off by the window.
    let mut current: Option<(i64, Vec<&str>)> = None;
    for line in window {
        if let Some(timestamp) = parse_header(line) {
            if let Some((ts, body)) = current.take() {
                if !body.is_empty() {
                    push_capped(
                        &mut entries,
                        HistoryEntry {
                            timestamp: ts,
                            command: body.join("\n"),
                        },
                        max_commands,
                    );
                }
            }
            current = Some((timestamp, Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((ts, body)) = current {
        if !body.is_empty() {
            push_capped(
                &mut entries,
                HistoryEntry {
                    timestamp: ts,
                    command: body.join("\n"),
                },
                max_commands,
            );
        }
    }

    entries
}

/// Serialize entries in the on-disk format.
pub fn serialize_entries<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("#{}\n{}\n", entry.timestamp, entry.command));
    }
    out
}

/// File-backed history store
#[derive(Debug)]
pub struct CommandsHistory {
    path: PathBuf,
    max_commands: usize,
    entries: VecDeque<HistoryEntry>,
}

impl CommandsHistory {
    /// Open the store and load the backing file. A missing file is an empty history.
    pub fn open<P: AsRef<Path>>(path: P, max_commands: usize) -> Result<Self, HistoryError> {
        let mut history = Self {
            path: path.as_ref().to_path_buf(),
            max_commands,
            entries: VecDeque::new(),
        };
        history.load()?;
        Ok(history)
    }

    pub fn load(&mut self) -> Result<(), HistoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "History file not found, starting empty");
                self.entries.clear();
                return Ok(());
            }
            Err(e) => return Err(HistoryError::Io(e)),
        };

        self.entries = parse_entries(&content, self.max_commands);
        debug!(
            path = %self.path.display(),
            entries = self.entries.len(),
            "History loaded"
        );
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Rewrite the backing file from the in-memory list.
    ///
    /// Uses temporary file + rename so a failed write leaves the old file intact.
    fn save(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, serialize_entries(&self.entries))?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            HistoryError::Io(e)
        })
    }
}

impl History for CommandsHistory {
    fn append_command(&mut self, text: &str) -> Result<(), HistoryError> {
        push_capped(&mut self.entries, HistoryEntry::now(text), self.max_commands);
        self.save()
    }

    fn commands(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.command.clone()).collect()
    }

    fn close(&mut self) -> Result<(), HistoryError> {
        Ok(())
    }
}

/// In-memory history for sessions without a backing file
#[derive(Debug, Default)]
pub struct MemoryHistory {
    max_commands: usize,
    entries: VecDeque<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new(max_commands: usize) -> Self {
        Self {
            max_commands,
            entries: VecDeque::new(),
        }
    }
}

impl History for MemoryHistory {
    fn append_command(&mut self, text: &str) -> Result<(), HistoryError> {
        push_capped(&mut self.entries, HistoryEntry::now(text), self.max_commands);
        Ok(())
    }

    fn commands(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.command.clone()).collect()
    }

    fn close(&mut self) -> Result<(), HistoryError> {
        Ok(())
    }
}
