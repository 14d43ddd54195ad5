//! Integration tests for the Stanza statement console

mod rendering;
mod test_utils;
mod xdg_config;

pub use test_utils::*;
