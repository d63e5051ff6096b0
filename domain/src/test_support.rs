//! Event stream fixtures shared by unit tests.

use crate::event::{
    ConsensusBegin, ConsensusCompare, Event, EventKind, SubphaseBegin, TurnBegin, VoteSettled,
    WorkerAborted, WorkerComplete, WorkerPending,
};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

pub fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Appends events with increasing ids and a controllable clock.
#[derive(Default)]
pub struct StreamBuilder {
    events: Vec<Event>,
    clock_ms: i64,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        t0() + Duration::milliseconds(self.clock_ms)
    }

    /// Advance the clock without emitting anything.
    pub fn advance(mut self, ms: i64) -> Self {
        self.clock_ms += ms;
        self
    }

    pub fn push(mut self, kind: EventKind) -> Self {
        let id = self.events.len() as u64 + 1;
        let at = self.now();
        self.events.push(Event::new(id, at, kind));
        self
    }

    pub fn turn(self, game_turn: u32) -> Self {
        self.push(EventKind::TurnBegin(TurnBegin {
            game_turn: Some(game_turn),
            actor: None,
        }))
    }

    pub fn subphase(self, prompt: &str) -> Self {
        self.push(EventKind::SubphaseBegin(SubphaseBegin {
            prompt: Some(prompt.to_string()),
            episode_type: None,
        }))
    }

    pub fn consensus(self, roster_size: usize) -> Self {
        self.push(EventKind::ConsensusBegin(ConsensusBegin {
            roster_size,
            game_state: None,
        }))
    }

    pub fn pending(self, slot: usize, name: &str) -> Self {
        self.push(EventKind::WorkerPending(WorkerPending {
            slot,
            name: name.to_string(),
            start_time: None,
        }))
    }

    pub fn complete(self, slot: usize, duration_ms: u64, action: Value) -> Self {
        self.push(EventKind::WorkerComplete(WorkerComplete {
            slot,
            name: None,
            duration_ms,
            success: true,
            action: Some(action),
            aborted: None,
        }))
    }

    pub fn failed(self, slot: usize, duration_ms: u64) -> Self {
        self.push(EventKind::WorkerComplete(WorkerComplete {
            slot,
            name: None,
            duration_ms,
            success: false,
            action: None,
            aborted: None,
        }))
    }

    pub fn aborted(self, slot: usize, duration_ms: u64) -> Self {
        self.push(EventKind::WorkerAborted(WorkerAborted {
            slot,
            name: None,
            duration_ms,
        }))
    }

    pub fn compare(self, detail: Value) -> Self {
        self.push(EventKind::ConsensusCompare(ConsensusCompare { detail }))
    }

    pub fn note(self) -> Self {
        self.push(EventKind::Other("log-note".to_string()))
    }

    pub fn settle(self) -> Self {
        self.push(EventKind::VoteSettled(VoteSettled { decision_id: None }))
    }

    /// One full round: begin, all workers answer `action`, settle.
    pub fn round(mut self, names: &[&str], action: Value) -> Self {
        self = self.consensus(names.len());
        for (slot, name) in names.iter().enumerate() {
            self = self.pending(slot, name);
        }
        for slot in 0..names.len() {
            self = self.advance(10).complete(slot, 10 * (slot as u64 + 1), action.clone());
        }
        self.settle()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn build(self) -> Vec<Event> {
        self.events
    }
}
