//! Vote aggregation
//!
//! Turns a round's worker statuses into ranked [`VoteGroup`]s. Two
//! proposals land in the same group when they are structurally equal once
//! their free-text rationale is removed.
//!
//! ```text
//! WorkerStatus[] ──filter──► votes ──strip rationale──► group ──rank──► VoteTally
//!                    │
//!                    └── failed / aborted / pending counted separately
//! ```
//!
//! A [`QuorumRule`] can then say whether the winning group carries enough
//! of the expected roster.

pub mod rationale;
pub mod rule;
pub mod vote;

pub use rationale::{RATIONALE_KEYS, strip_rationale};
pub use rule::QuorumRule;
pub use vote::{Ballot, TallyStatus, VoteGroup, VoteTally, aggregate};
