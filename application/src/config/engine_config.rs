//! Engine configuration.

use decision_log_domain::{BuilderConfig, QuorumRule};

/// Settings for folding the event stream and judging tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub builder: BuilderConfig,
    /// Rule used to report whether a winner reached quorum
    pub rule: QuorumRule,
}

impl EngineConfig {
    pub fn new(builder: BuilderConfig, rule: QuorumRule) -> Self {
        Self { builder, rule }
    }

    pub fn with_detail_lookback(mut self, lookback: usize) -> Self {
        self.builder.detail_lookback = lookback;
        self
    }

    pub fn with_rule(mut self, rule: QuorumRule) -> Self {
        self.rule = rule;
        self
    }
}
