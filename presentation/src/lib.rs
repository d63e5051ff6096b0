//! Presentation layer for decision-log
//!
//! This crate contains CLI definitions, output formatters,
//! and progress reporters for live watching.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{LiveReporter, SimpleProgress};
