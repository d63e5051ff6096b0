//! Vote configuration from TOML (`[vote]` section)
//!
//! The rule does not change which group wins; it only decides whether the
//! winner is reported as having reached quorum.
//!
//! ```toml
//! [vote]
//! rule = "majority"   # or "unanimous", "atleast:2", "75%"
//! ```

use decision_log_domain::QuorumRule;
use serde::{Deserialize, Serialize};

/// Raw vote configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVoteConfig {
    /// Quorum rule: "majority", "unanimous", "atleast:N", "N%"
    pub rule: String,
}

impl Default for FileVoteConfig {
    fn default() -> Self {
        Self {
            rule: "majority".to_string(),
        }
    }
}

impl FileVoteConfig {
    /// Parse the rule string into a [`QuorumRule`]
    pub fn parse_rule(&self) -> Result<QuorumRule, String> {
        self.rule.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_config_default() {
        let config = FileVoteConfig::default();
        assert_eq!(config.parse_rule(), Ok(QuorumRule::Majority));
    }

    #[test]
    fn test_vote_config_parse_rule() {
        let mut config = FileVoteConfig::default();

        config.rule = "unanimous".to_string();
        assert_eq!(config.parse_rule(), Ok(QuorumRule::Unanimous));

        config.rule = "atleast:2".to_string();
        assert_eq!(config.parse_rule(), Ok(QuorumRule::AtLeast(2)));

        config.rule = "75%".to_string();
        assert_eq!(config.parse_rule(), Ok(QuorumRule::Percentage(75)));

        config.rule = "plurality".to_string();
        assert!(config.parse_rule().is_err());
    }
}
