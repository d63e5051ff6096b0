//! Vote groups and tallies

use super::rationale::strip_rationale;
use super::rule::QuorumRule;
use crate::worker::WorkerStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Workers that proposed the same action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteGroup {
    /// The proposed action with its rationale removed
    pub action: Value,
    pub vote_count: usize,
    pub voter_names: Vec<String>,
    pub voter_slots: Vec<usize>,
    pub is_winner: bool,
    /// Winner is always valid; other groups only become invalid through
    /// [`VoteTally::apply_validity`]
    pub is_valid: bool,
}

/// How one worker's slot figures in the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ballot {
    /// Voted with the winning group
    Winner,
    /// Voted with a losing group
    Other,
    /// Completed without a usable proposal
    Failed,
    Aborted,
    Pending,
}

impl Ballot {
    pub fn mark(&self) -> char {
        match self {
            Ballot::Winner => '●',
            Ballot::Other => '○',
            Ballot::Failed => '×',
            Ballot::Aborted => '-',
            Ballot::Pending => '·',
        }
    }
}

/// Whether any vote exists.
///
/// Distinct from "no tally requested", which callers represent as
/// `Option<VoteTally>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyStatus {
    /// Nothing to rank yet (or every worker failed or was aborted)
    NoVotes,
    Decided,
}

/// Ranked result of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Groups ranked by vote count, descending; ties keep first-formed order
    pub groups: Vec<VoteGroup>,
    /// Supplied roster size, or the number of statuses when none was given
    pub total_expected: usize,
    /// Per-slot ballot, in status order
    pub ballots: Vec<(usize, Ballot)>,
    /// Completed but produced no usable proposal
    pub failed: usize,
    pub aborted: usize,
    pub pending: usize,
}

/// Aggregate a round's statuses into ranked vote groups.
///
/// `expected_roster` of `None` or `Some(0)` falls back to the number of
/// statuses present, which covers a round still filling in.
pub fn aggregate(statuses: &[WorkerStatus], expected_roster: Option<usize>) -> VoteTally {
    let mut groups: Vec<VoteGroup> = Vec::new();

    for status in statuses.iter().filter(|s| s.is_vote()) {
        let Some(action) = status.proposed_action.as_ref() else {
            continue;
        };
        let key = strip_rationale(action);

        match groups.iter_mut().find(|g| g.action == key) {
            Some(group) => {
                group.vote_count += 1;
                group.voter_names.push(status.display_name.clone());
                group.voter_slots.push(status.slot);
            }
            None => groups.push(VoteGroup {
                action: key,
                vote_count: 1,
                voter_names: vec![status.display_name.clone()],
                voter_slots: vec![status.slot],
                is_winner: false,
                is_valid: true,
            }),
        }
    }

    // stable: equal counts keep the order in which groups formed
    groups.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));
    if let Some(first) = groups.first_mut() {
        first.is_winner = true;
    }

    let ballots = statuses
        .iter()
        .map(|s| (s.slot, ballot_for(s, groups.first())))
        .collect::<Vec<_>>();
    let count = |b: Ballot| ballots.iter().filter(|(_, x)| *x == b).count();

    VoteTally {
        total_expected: expected_roster
            .filter(|n| *n > 0)
            .unwrap_or(statuses.len()),
        failed: count(Ballot::Failed),
        aborted: count(Ballot::Aborted),
        pending: count(Ballot::Pending),
        ballots,
        groups,
    }
}

fn ballot_for(status: &WorkerStatus, winner: Option<&VoteGroup>) -> Ballot {
    if !status.completed {
        Ballot::Pending
    } else if status.is_aborted() {
        Ballot::Aborted
    } else if status.is_vote() {
        match winner {
            Some(w) if w.voter_slots.contains(&status.slot) => Ballot::Winner,
            _ => Ballot::Other,
        }
    } else {
        Ballot::Failed
    }
}

impl VoteTally {
    pub fn status(&self) -> TallyStatus {
        if self.groups.is_empty() {
            TallyStatus::NoVotes
        } else {
            TallyStatus::Decided
        }
    }

    pub fn winner(&self) -> Option<&VoteGroup> {
        self.groups.first().filter(|g| g.is_winner)
    }

    /// Total votes cast across all groups.
    pub fn votes_cast(&self) -> usize {
        self.groups.iter().map(|g| g.vote_count).sum()
    }

    /// Fraction of the expected roster that voted for `group` (0.0 to 1.0).
    pub fn share(&self, group: &VoteGroup) -> f64 {
        if self.total_expected == 0 {
            0.0
        } else {
            group.vote_count as f64 / self.total_expected as f64
        }
    }

    /// Whether the winner satisfies `rule` against the expected roster.
    pub fn reached(&self, rule: &QuorumRule) -> bool {
        self.winner()
            .is_some_and(|w| rule.is_satisfied(w.vote_count, self.total_expected))
    }

    /// Whether every vote cast went to the winner.
    pub fn is_unanimous(&self) -> bool {
        self.groups.len() == 1
    }

    /// Mark losing groups valid or invalid with an externally supplied
    /// check. The winner was acted upon and stays valid.
    pub fn apply_validity(&mut self, is_valid: impl Fn(&Value) -> bool) {
        for group in self.groups.iter_mut().filter(|g| !g.is_winner) {
            group.is_valid = is_valid(&group.action);
        }
    }

    /// Visual ballot summary in slot order (e.g., "[●●○×]").
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        for (_, ballot) in &self.ballots {
            summary.push(ballot.mark());
        }
        summary.push(']');
        summary
    }
}
