//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod builder;
mod output;
mod vote;
mod watch;

pub use builder::FileBuilderConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use vote::FileVoteConfig;
pub use watch::FileWatchConfig;

use decision_log_application::{EngineConfig, WatchParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("watch.{field} cannot be 0")]
    ZeroInterval { field: &'static str },

    #[error("vote.rule: {0}")]
    InvalidRule(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Event folding settings
    pub builder: FileBuilderConfig,
    /// Quorum rule for reporting
    pub vote: FileVoteConfig,
    /// Live watch cadence
    pub watch: FileWatchConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.watch.refresh_ms == 0 {
            issues.push(ConfigValidationError::ZeroInterval {
                field: "refresh_ms",
            });
        }
        if self.watch.idle_ms == 0 {
            issues.push(ConfigValidationError::ZeroInterval { field: "idle_ms" });
        }
        if let Err(e) = self.vote.parse_rule() {
            issues.push(ConfigValidationError::InvalidRule(e));
        }

        issues
    }

    /// Engine settings. Fails only on an unparseable quorum rule.
    pub fn to_engine_config(&self) -> Result<EngineConfig, ConfigValidationError> {
        let rule = self
            .vote
            .parse_rule()
            .map_err(ConfigValidationError::InvalidRule)?;
        Ok(EngineConfig::new(self.builder.to_builder_config(), rule))
    }

    pub fn to_watch_params(&self) -> WatchParams {
        self.watch.to_watch_params()
    }
}
