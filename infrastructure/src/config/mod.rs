//! Configuration file loading for decision-log
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DECISION_LOG_*` environment variables (`DECISION_LOG_WATCH__IDLE_MS=200`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./decision-log.toml` or `./.decision-log.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/decision-log/config.toml`
//! 5. Fallback: `~/.config/decision-log/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBuilderConfig, FileConfig, FileOutputConfig, FileOutputFormat,
    FileVoteConfig, FileWatchConfig,
};
pub use loader::ConfigLoader;
