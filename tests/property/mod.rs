//! Property-based tests for rendering and history invariants

mod history_cap;
mod render_properties;
