//! CLI output: error mapping and exit codes.

use crate::console::SessionEnd;
use crate::error::ConsoleError;

/// Map console errors to a string for CLI output.
pub fn map_error(e: &ConsoleError) -> String {
    e.to_string()
}

/// Process exit code for a finished session.
pub fn exit_code(result: &Result<SessionEnd, ConsoleError>) -> i32 {
    match result {
        Ok(SessionEnd::EndOfInput | SessionEnd::Quit | SessionEnd::BackendClosed) => 0,
        Err(_) => 1,
    }
}
