//! Turn and decision entities

use crate::event::EventId;
use crate::worker::{WorkerRoster, WorkerStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A settled round. Never mutated after the builder creates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Decision id carried by the settling event
    pub id: String,
    /// 1-based position within the owning turn
    pub step_number: usize,
    /// The `vote-settled` event itself
    pub vote_event_id: EventId,
    /// Compare-detail event found shortly before settlement, if any
    pub settled_event_id: Option<EventId>,
    pub settled_at: DateTime<Utc>,
    /// Roster size announced when the round began (0 if unknown)
    pub roster_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_state: Option<Value>,
    /// Frozen copy of the worker statuses at settlement, in slot order
    pub worker_statuses: Vec<WorkerStatus>,
}

/// In-flight round owned by the newest turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingState {
    pub began_event_id: EventId,
    pub began_at: DateTime<Utc>,
    pub roster_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_state: Option<Value>,
    pub workers: WorkerRoster,
}

/// A contiguous span of decisions for one move or forced response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// 1-based position in the turn list
    pub ordinal: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_turn: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub decisions: Vec<Decision>,
    pub is_sub_phase: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_phase_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingState>,
}

impl Turn {
    pub fn new(ordinal: usize) -> Self {
        Self {
            ordinal,
            game_turn: None,
            actor: None,
            decisions: Vec::new(),
            is_sub_phase: false,
            sub_phase_label: None,
            pending: None,
        }
    }

    pub fn sub_phase(ordinal: usize, label: impl Into<String>) -> Self {
        Self {
            is_sub_phase: true,
            sub_phase_label: Some(label.into()),
            ..Self::new(ordinal)
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Index of the newest action in this turn.
    ///
    /// A pending turn reserves one slot past its settled decisions for the
    /// round in flight.
    pub fn last_action_index(&self) -> usize {
        if self.is_pending() {
            self.decisions.len()
        } else {
            self.decisions.len().saturating_sub(1)
        }
    }

    /// Human-readable heading, e.g. "Turn 3" or "Block attack".
    pub fn title(&self) -> String {
        match (&self.sub_phase_label, self.game_turn) {
            (Some(label), _) if self.is_sub_phase => label.clone(),
            (_, Some(n)) => format!("Turn {n}"),
            _ => format!("Turn {}", self.ordinal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_state() -> PendingState {
        PendingState {
            began_event_id: EventId::new(1),
            began_at: DateTime::<Utc>::UNIX_EPOCH,
            roster_size: 2,
            game_state: None,
            workers: WorkerRoster::new(),
        }
    }

    #[test]
    fn test_last_action_index_settled() {
        let mut turn = Turn::new(1);
        assert_eq!(turn.last_action_index(), 0);

        turn.pending = Some(pending_state());
        assert_eq!(turn.last_action_index(), 0);
    }

    #[test]
    fn test_title() {
        let mut turn = Turn::new(4);
        assert_eq!(turn.title(), "Turn 4");
        turn.game_turn = Some(9);
        assert_eq!(turn.title(), "Turn 9");
        assert_eq!(Turn::sub_phase(5, "Block").title(), "Block");
    }
}
