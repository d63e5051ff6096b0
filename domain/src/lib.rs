//! Domain layer for decision-log
//!
//! This crate contains the consensus decision log engine. It has no I/O and
//! no dependencies on the application, infrastructure or presentation
//! layers.
//!
//! # Core Concepts
//!
//! ## Event stream
//!
//! An append-only list of [`Event`]s describing a committee of workers
//! racing to propose the next game action.
//!
//! ## Turns and decisions
//!
//! [`build`] folds the stream into [`Turn`]s holding settled [`Decision`]s.
//! The newest turn may also hold the round still in flight.
//!
//! ## Aggregation
//!
//! - [`aggregate`]: ranked vote groups for a decision
//! - [`timings`]: per-worker durations for relative comparison
//!
//! ## Navigation
//!
//! [`NavigationCursor`] walks the turn list and follows the newest decision
//! until the viewer steps away.

pub mod config;
pub mod event;
pub mod navigation;
pub mod quorum;
pub mod timing;
pub mod turn;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::OutputFormat;
pub use event::{Event, EventDecodeError, EventId, EventKind, RawEvent, find_event};
pub use navigation::{
    CursorCommand, CursorPosition, CursorTarget, NavigationCursor, latest_position,
};
pub use quorum::{
    Ballot, QuorumRule, TallyStatus, VoteGroup, VoteTally, aggregate, strip_rationale,
};
pub use timing::{TimingEntry, max_duration, timings};
pub use turn::{
    BuilderConfig, DEFAULT_DETAIL_LOOKBACK, Decision, DecisionLogBuilder, PendingState, Turn,
    build, decision_detail,
};
pub use worker::{WorkerRoster, WorkerStatus};
