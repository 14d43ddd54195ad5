//! CLI domain: parse, route and output only.
//! Session behavior lives in the console; the route wires config into it.

mod output;
mod parse;
mod route;

pub use output::{exit_code, map_error};
pub use parse::Cli;
pub use route::RunContext;
