//! Watch configuration from TOML (`[watch]` section)

use decision_log_application::WatchParams;
use serde::{Deserialize, Serialize};

/// Polling cadence for live watching
///
/// ```toml
/// [watch]
/// refresh_ms = 50     # while a round is in flight
/// idle_ms = 1000      # otherwise
/// follow = false      # keep watching after the last round settles
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWatchConfig {
    pub refresh_ms: u64,
    pub idle_ms: u64,
    pub follow: bool,
}

impl Default for FileWatchConfig {
    fn default() -> Self {
        Self {
            refresh_ms: 50,
            idle_ms: 1000,
            follow: false,
        }
    }
}

impl FileWatchConfig {
    pub fn to_watch_params(&self) -> WatchParams {
        WatchParams::default()
            .with_refresh_ms(self.refresh_ms)
            .with_idle_ms(self.idle_ms)
            .with_follow(self.follow)
    }
}
