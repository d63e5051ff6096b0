//! Quorum rules for judging a winning group
//!
//! The aggregator always names a winner when any vote exists; a rule says
//! whether that winner also carries enough of the expected roster to be
//! called a quorum.

use serde::{Deserialize, Serialize};

/// Rule for deciding whether the winning group reached a quorum
///
/// - `Majority`: more than half of the expected roster (default)
/// - `Unanimous`: the whole roster
/// - `AtLeast(n)`: at least n votes
/// - `Percentage(p)`: at least p% of the roster
///
/// # Example
///
/// ```
/// use decision_log_domain::quorum::QuorumRule;
///
/// let rule = QuorumRule::Majority;
/// assert!(rule.is_satisfied(2, 3));
/// assert!(!rule.is_satisfied(1, 3));
///
/// let strict = QuorumRule::Unanimous;
/// assert!(strict.is_satisfied(3, 3));
/// assert!(!strict.is_satisfied(2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuorumRule {
    /// More than half must agree (n/2 + 1)
    #[default]
    Majority,

    /// Every expected worker must agree
    Unanimous,

    /// At least n workers must agree
    AtLeast(usize),

    /// At least this percentage must agree (0-100)
    Percentage(u8),
}

impl QuorumRule {
    /// Check the rule given the winner's vote count and the expected roster
    pub fn is_satisfied(&self, votes: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }

        votes >= self.min_votes_needed(total)
    }

    /// Minimum number of agreeing votes for a roster of `total`
    pub fn min_votes_needed(&self, total: usize) -> usize {
        match self {
            QuorumRule::Majority => total / 2 + 1,
            QuorumRule::Unanimous => total,
            QuorumRule::AtLeast(n) => *n,
            QuorumRule::Percentage(p) => (total as f64 * (*p as f64 / 100.0)).ceil() as usize,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> String {
        match self {
            QuorumRule::Majority => "majority (more than half)".to_string(),
            QuorumRule::Unanimous => "unanimous (every worker)".to_string(),
            QuorumRule::AtLeast(n) => format!("at least {} votes", n),
            QuorumRule::Percentage(p) => format!("at least {}% of the roster", p),
        }
    }
}

impl std::fmt::Display for QuorumRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for QuorumRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "majority" => Ok(QuorumRule::Majority),
            "unanimous" => Ok(QuorumRule::Unanimous),
            s if s.starts_with("atleast:") || s.starts_with("at_least:") => {
                let n: usize = s
                    .split(':')
                    .nth(1)
                    .ok_or("Missing number after atleast:")?
                    .parse()
                    .map_err(|_| "Invalid number for atleast")?;
                Ok(QuorumRule::AtLeast(n))
            }
            s if s.starts_with("percentage:") || s.ends_with('%') => {
                let num_str = s.trim_start_matches("percentage:").trim_end_matches('%');
                let p: u8 = num_str.parse().map_err(|_| "Invalid percentage")?;
                if p > 100 {
                    return Err(format!("Percentage out of range: {}", p));
                }
                Ok(QuorumRule::Percentage(p))
            }
            _ => Err(format!(
                "Unknown quorum rule: {}. Valid: majority, unanimous, atleast:N, percentage:N or N%",
                s
            )),
        }
    }
}
