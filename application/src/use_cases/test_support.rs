//! Shared fixtures for use case tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use decision_log_domain::event::{
    ConsensusBegin, TurnBegin, VoteSettled, WorkerComplete, WorkerPending,
};
use decision_log_domain::{Event, EventKind};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ports::event_source::{EventSource, EventSourceError};

pub fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

pub mod events {
    use super::*;
    use serde_json::json;

    fn at(id: u64, kind: EventKind) -> Event {
        Event::new(id, t0() + Duration::milliseconds(id as i64), kind)
    }

    pub fn turn(id: u64, n: u32) -> Event {
        at(
            id,
            EventKind::TurnBegin(TurnBegin {
                game_turn: Some(n),
                actor: None,
            }),
        )
    }

    pub fn consensus(id: u64, roster_size: usize) -> Event {
        at(
            id,
            EventKind::ConsensusBegin(ConsensusBegin {
                roster_size,
                game_state: None,
            }),
        )
    }

    pub fn pending(id: u64, slot: usize, name: &str) -> Event {
        Event::new(
            id,
            t0(),
            EventKind::WorkerPending(WorkerPending {
                slot,
                name: name.to_string(),
                start_time: Some(t0()),
            }),
        )
    }

    pub fn complete(id: u64, slot: usize, duration_ms: u64, action: &str) -> Event {
        at(
            id,
            EventKind::WorkerComplete(WorkerComplete {
                slot,
                name: None,
                duration_ms,
                success: true,
                action: Some(json!({"type": action})),
                aborted: None,
            }),
        )
    }

    pub fn settle(id: u64) -> Event {
        at(id, EventKind::VoteSettled(VoteSettled::default()))
    }

    /// turn-begin, two workers agreeing, vote-settled.
    pub fn two_worker_round() -> Vec<Event> {
        vec![
            turn(1, 1),
            consensus(2, 2),
            pending(3, 0, "A"),
            pending(4, 1, "B"),
            complete(5, 0, 100, "X"),
            complete(6, 1, 150, "X"),
            settle(7),
        ]
    }

    /// A full turn with one worker, ids `first..first + 5`.
    pub fn single_vote_turn(first: u64, n: u32, action: &str) -> Vec<Event> {
        vec![
            turn(first, n),
            consensus(first + 1, 1),
            pending(first + 2, 0, "A"),
            complete(first + 3, 0, 10, action),
            settle(first + 4),
        ]
    }

    /// turn-begin, one worker still running.
    pub fn round_in_flight() -> Vec<Event> {
        vec![turn(1, 1), consensus(2, 1), pending(3, 0, "A")]
    }
}

/// In-memory source that hands out scripted batches on `read_new`.
pub struct ScriptedSource {
    initial: Vec<Event>,
    batches: Mutex<VecDeque<Vec<Event>>>,
}

impl ScriptedSource {
    pub fn new(initial: Vec<Event>, batches: Vec<Vec<Event>>) -> Self {
        Self {
            initial,
            batches: Mutex::new(batches.into()),
        }
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn read_all(&self) -> Result<Vec<Event>, EventSourceError> {
        Ok(self.initial.clone())
    }

    async fn read_new(&self) -> Result<Vec<Event>, EventSourceError> {
        Ok(self
            .batches
            .lock()
            .map(|mut b| b.pop_front().unwrap_or_default())
            .unwrap_or_default())
    }
}
