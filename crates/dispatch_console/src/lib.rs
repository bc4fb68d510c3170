//! Operator console for the dispatch engine.

pub mod cli;
pub mod console;
pub mod render;
