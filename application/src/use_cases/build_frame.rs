//! Frame projection
//!
//! A [`DecisionFrame`] is everything a renderer needs for one refresh,
//! computed from a single snapshot of the event list so that a frame
//! never mixes data from two stream lengths.

use crate::config::EngineConfig;
use chrono::{DateTime, Utc};
use decision_log_domain::{
    CursorPosition, CursorTarget, Event, NavigationCursor, TimingEntry, Turn, VoteTally,
    aggregate, decision_detail, timings,
};
use serde::{Serialize, Serializer};

/// Boundary flags for the four navigation commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub has_prev_action: bool,
    pub has_next_action: bool,
    pub has_prev_turn: bool,
    pub has_next_turn: bool,
}

/// Display data for the action under the cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub position: CursorPosition,
    /// Round still in flight (no decision id yet)
    pub in_flight: bool,
    pub decision_id: Option<String>,
    /// 1-based step within the turn; in-flight rounds get the next step
    pub step_number: usize,
    pub tally: VoteTally,
    pub timings: Vec<TimingEntry>,
    pub quorum_reached: bool,
    /// Compare-detail event, when one was found near settlement
    #[serde(serialize_with = "serialize_detail")]
    pub detail: Option<Event>,
}

/// One render frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionFrame {
    /// Number of events the frame was built from
    pub stream_len: usize,
    pub turns: Vec<Turn>,
    pub following_latest: bool,
    pub navigation: NavigationState,
    /// `None` when there is nothing to select yet
    pub selection: Option<Selection>,
    pub built_at: DateTime<Utc>,
}

impl DecisionFrame {
    /// Project a frame from one snapshot.
    pub fn project(
        events: &[Event],
        turns: Vec<Turn>,
        cursor: &NavigationCursor,
        config: &EngineConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let navigation = NavigationState {
            has_prev_action: cursor.has_prev_action(&turns),
            has_next_action: cursor.has_next_action(&turns),
            has_prev_turn: cursor.has_prev_turn(&turns),
            has_next_turn: cursor.has_next_turn(&turns),
        };
        let selection = select(events, &turns, cursor, config, now);

        Self {
            stream_len: events.len(),
            following_latest: cursor.is_following_latest(),
            navigation,
            selection,
            turns,
            built_at: now,
        }
    }

    /// Turn under the cursor.
    pub fn current_turn(&self) -> Option<&Turn> {
        self.selection
            .as_ref()
            .and_then(|s| self.turns.get(s.position.turn_index))
    }

    /// Whether any round is in flight.
    pub fn has_pending(&self) -> bool {
        self.turns.last().is_some_and(Turn::is_pending)
    }
}

/// Events serialize in their wire shape.
fn serialize_detail<S: Serializer>(detail: &Option<Event>, serializer: S) -> Result<S::Ok, S::Error> {
    detail.as_ref().map(Event::to_raw).serialize(serializer)
}

fn select(
    events: &[Event],
    turns: &[Turn],
    cursor: &NavigationCursor,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Option<Selection> {
    let position = cursor.position(turns)?;
    let (turn, target) = cursor.current(turns)?;

    let selection = match target? {
        CursorTarget::Settled(decision) => {
            let tally = aggregate(&decision.worker_statuses, Some(decision.roster_size));
            Selection {
                position,
                in_flight: false,
                decision_id: Some(decision.id.clone()),
                step_number: decision.step_number,
                quorum_reached: tally.reached(&config.rule),
                // Frozen at settlement; history never moves with the clock.
                timings: timings(&decision.worker_statuses, now.min(decision.settled_at)),
                detail: decision_detail(events, decision).cloned(),
                tally,
            }
        }
        CursorTarget::InFlight(pending) => {
            let statuses = pending.workers.snapshot();
            let tally = aggregate(&statuses, Some(pending.roster_size));
            Selection {
                position,
                in_flight: true,
                decision_id: None,
                step_number: turn.decisions.len() + 1,
                quorum_reached: tally.reached(&config.rule),
                timings: timings(&statuses, now),
                detail: None,
                tally,
            }
        }
    };
    Some(selection)
}
