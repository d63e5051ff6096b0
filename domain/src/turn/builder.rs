//! Event stream → turn list fold
//!
//! [`DecisionLogBuilder`] is an explicit fold state: feed it events with
//! [`ingest`](DecisionLogBuilder::ingest) and read the current turn list
//! with [`snapshot`](DecisionLogBuilder::snapshot). [`build`] does a full
//! rebuild from scratch; both paths produce identical turns.
//!
//! Malformed or out-of-order input never fails the fold. Events that make
//! no sense in the current state are dropped with a `debug!` trace.

use super::entities::{Decision, PendingState, Turn};
use super::label::sub_phase_label;
use crate::event::{Event, EventId, EventKind, find_event};
use crate::worker::WorkerRoster;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// How many prior entries are searched for a round's compare detail.
pub const DEFAULT_DETAIL_LOOKBACK: usize = 5;

/// Builder tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Look-back window for resolving `Decision::settled_event_id`
    pub detail_lookback: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            detail_lookback: DEFAULT_DETAIL_LOOKBACK,
        }
    }
}

/// Fold state for turning events into [`Turn`]s.
#[derive(Debug, Clone, Default)]
pub struct DecisionLogBuilder {
    config: BuilderConfig,
    turns: Vec<Turn>,
    building: Option<Turn>,
    step_counter: usize,
    /// Most recent entries as `(id, is_compare)`, newest last
    recent: VecDeque<(EventId, bool)>,
    ingested: usize,
}

/// Full rebuild with the default configuration.
pub fn build(events: &[Event]) -> Vec<Turn> {
    DecisionLogBuilder::new(BuilderConfig::default())
        .with_events(events)
        .snapshot()
}

/// Resolve the compare-detail event a decision points at.
pub fn decision_detail<'a>(events: &'a [Event], decision: &Decision) -> Option<&'a Event> {
    decision
        .settled_event_id
        .and_then(|id| find_event(events, id))
}

impl DecisionLogBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Fold a whole slice, consuming and returning the builder.
    pub fn with_events(mut self, events: &[Event]) -> Self {
        self.extend(events);
        self
    }

    pub fn extend<'a>(&mut self, events: impl IntoIterator<Item = &'a Event>) {
        for event in events {
            self.ingest(event);
        }
    }

    /// Number of events folded so far.
    pub fn ingested(&self) -> usize {
        self.ingested
    }

    /// Whether a round is currently in flight.
    pub fn has_pending(&self) -> bool {
        self.building.as_ref().is_some_and(Turn::is_pending)
    }

    /// Fold one event.
    pub fn ingest(&mut self, event: &Event) {
        match &event.kind {
            EventKind::TurnBegin(begin) => {
                self.flush();
                let mut turn = Turn::new(self.turns.len() + 1);
                turn.game_turn = begin.game_turn;
                turn.actor = begin.actor.clone();
                self.start(turn);
            }
            EventKind::SubphaseBegin(begin) => {
                self.flush();
                let label = sub_phase_label(begin.prompt.as_deref(), begin.episode_type.as_deref());
                self.start(Turn::sub_phase(self.turns.len() + 1, label));
            }
            EventKind::ConsensusBegin(begin) => {
                let ordinal = self.turns.len() + 1;
                let turn = self.building.get_or_insert_with(|| Turn::new(ordinal));
                turn.pending = Some(PendingState {
                    began_event_id: event.id,
                    began_at: event.timestamp,
                    roster_size: begin.roster_size,
                    game_state: begin.game_state.clone(),
                    workers: WorkerRoster::new(),
                });
            }
            EventKind::WorkerPending(p) => match self.roster_mut() {
                Some(roster) => roster.on_pending(p, event.timestamp),
                None => debug!(id = %event.id, "worker-pending outside a round ignored"),
            },
            EventKind::WorkerComplete(c) => match self.roster_mut() {
                Some(roster) => roster.on_complete(c, event.timestamp),
                None => debug!(id = %event.id, "worker-complete outside a round ignored"),
            },
            EventKind::WorkerAborted(a) => match self.roster_mut() {
                Some(roster) => roster.on_aborted(a, event.timestamp),
                None => debug!(id = %event.id, "worker-aborted outside a round ignored"),
            },
            EventKind::VoteSettled(settled) => {
                let detail = self.lookback_compare();
                match self.building.as_mut() {
                    Some(turn) => match turn.pending.take() {
                        Some(pending) => {
                            self.step_counter += 1;
                            turn.decisions.push(Decision {
                                id: settled
                                    .decision_id
                                    .clone()
                                    .unwrap_or_else(|| event.id.value().to_string()),
                                step_number: self.step_counter,
                                vote_event_id: event.id,
                                settled_event_id: detail,
                                settled_at: event.timestamp,
                                roster_size: pending.roster_size,
                                game_state: pending.game_state,
                                worker_statuses: pending.workers.snapshot(),
                            });
                        }
                        None => debug!(id = %event.id, "vote-settled without a pending round ignored"),
                    },
                    None => debug!(id = %event.id, "vote-settled before any turn ignored"),
                }
            }
            EventKind::ConsensusCompare(_) | EventKind::Other(_) => {}
        }

        self.remember(event);
        self.ingested += 1;
    }

    /// Current turn list: flushed turns plus the turn being built when it
    /// has settled decisions or a round in flight.
    pub fn snapshot(&self) -> Vec<Turn> {
        let mut turns = self.turns.clone();
        if let Some(turn) = self.building.as_ref().filter(|t| Self::retained(t)) {
            turns.push(turn.clone());
        }
        turns
    }

    /// Consume the builder, yielding the same list as [`snapshot`](Self::snapshot).
    pub fn into_turns(mut self) -> Vec<Turn> {
        if let Some(turn) = self.building.take().filter(Self::retained) {
            self.turns.push(turn);
        }
        self.turns
    }

    fn retained(turn: &Turn) -> bool {
        !turn.decisions.is_empty() || turn.is_pending()
    }

    fn start(&mut self, turn: Turn) {
        self.building = Some(turn);
        self.step_counter = 0;
    }

    /// Close the turn being built. Turns without settled decisions are
    /// dropped; a round still in flight is abandoned so only the newest
    /// turn can ever be pending.
    fn flush(&mut self) {
        let Some(mut turn) = self.building.take() else {
            return;
        };
        if turn.decisions.is_empty() {
            debug!(ordinal = turn.ordinal, "turn without decisions discarded");
            return;
        }
        if turn.pending.take().is_some() {
            debug!(ordinal = turn.ordinal, "in-flight round abandoned at turn boundary");
        }
        self.turns.push(turn);
    }

    fn roster_mut(&mut self) -> Option<&mut WorkerRoster> {
        self.building
            .as_mut()
            .and_then(|t| t.pending.as_mut())
            .map(|p| &mut p.workers)
    }

    fn lookback_compare(&self) -> Option<EventId> {
        self.recent
            .iter()
            .rev()
            .find(|(_, is_compare)| *is_compare)
            .map(|(id, _)| *id)
    }

    fn remember(&mut self, event: &Event) {
        if self.config.detail_lookback == 0 {
            return;
        }
        if self.recent.len() == self.config.detail_lookback {
            self.recent.pop_front();
        }
        self.recent.push_back((event.id, event.is_compare()));
    }
}
