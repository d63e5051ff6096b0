//! Watch loop parameters.

use std::time::Duration;

/// Polling cadence for [`WatchDecisionLogUseCase`](crate::WatchDecisionLogUseCase).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchParams {
    /// Refresh cadence while a round is in flight (keeps live timers current)
    pub refresh_interval: Duration,
    /// Cadence for checking the source for new events when nothing is in flight
    pub idle_interval: Duration,
    /// Keep watching after the last round settles
    pub follow: bool,
}

impl Default for WatchParams {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_millis(50),
            idle_interval: Duration::from_millis(1000),
            follow: false,
        }
    }
}

impl WatchParams {
    pub fn with_refresh_ms(mut self, ms: u64) -> Self {
        self.refresh_interval = Duration::from_millis(ms);
        self
    }

    pub fn with_idle_ms(mut self, ms: u64) -> Self {
        self.idle_interval = Duration::from_millis(ms);
        self
    }

    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    /// Interval to wait before the next poll.
    pub fn interval(&self, round_in_flight: bool) -> Duration {
        if round_in_flight {
            self.refresh_interval
        } else {
            self.idle_interval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_by_state() {
        let params = WatchParams::default().with_refresh_ms(20).with_idle_ms(500);
        assert_eq!(params.interval(true), Duration::from_millis(20));
        assert_eq!(params.interval(false), Duration::from_millis(500));
        assert!(!params.follow);
    }
}
