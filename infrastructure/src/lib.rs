//! Infrastructure layer for decision-log
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod event_log;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBuilderConfig, FileConfig, FileOutputConfig,
    FileOutputFormat, FileVoteConfig, FileWatchConfig,
};
pub use event_log::JsonlEventSource;
