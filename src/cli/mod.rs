//! CLI layer for research-panel.
//!
//! Provides the command-line interface using clap, with commands for
//! chunking documents, inspecting metadata, and running the panel.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
