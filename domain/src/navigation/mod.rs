//! Navigation cursor over the turn list
//!
//! A small reducer over `(turn_index, action_index, following_latest)`.
//! While following, the effective position is always the newest action,
//! recomputed from whatever turn list is passed in. Any manual step away
//! from the frontier turns following off; stepping forward onto the
//! frontier turns it back on.
//!
//! The one other way back to following is [`NavigationCursor::observe`]:
//! when the turn count grows, the viewer is moved to the new turn.
//!
//! ```text
//!            step back / jump
//!  Following ───────────────► Manual
//!      ▲  ▲                      │
//!      │  └── reach frontier ────┤
//!      └───── turn count grows ──┘
//! ```

use crate::turn::{Decision, PendingState, Turn};
use serde::{Deserialize, Serialize};

/// A `(turn, action)` pair. `action_index == decisions.len()` on a pending
/// turn addresses the round in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub turn_index: usize,
    pub action_index: usize,
}

impl CursorPosition {
    pub fn new(turn_index: usize, action_index: usize) -> Self {
        Self {
            turn_index,
            action_index,
        }
    }
}

/// What the cursor points at inside its turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorTarget<'a> {
    Settled(&'a Decision),
    InFlight(&'a PendingState),
}

/// Commands accepted by [`NavigationCursor::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorCommand {
    PrevAction,
    NextAction,
    PrevTurn,
    NextTurn,
    /// Resume following the newest action
    Latest,
    JumpTo { turn: usize, action: usize },
    /// Step back up to `n` actions, stopping at the oldest
    BackBy(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationCursor {
    turn_index: usize,
    action_index: usize,
    following_latest: bool,
    observed_turns: usize,
}

impl Default for NavigationCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Newest position in `turns`, if any.
pub fn latest_position(turns: &[Turn]) -> Option<CursorPosition> {
    let turn_index = turns.len().checked_sub(1)?;
    Some(CursorPosition::new(
        turn_index,
        turns[turn_index].last_action_index(),
    ))
}

impl NavigationCursor {
    pub fn new() -> Self {
        Self {
            turn_index: 0,
            action_index: 0,
            following_latest: true,
            observed_turns: 0,
        }
    }

    pub fn is_following_latest(&self) -> bool {
        self.following_latest
    }

    /// Record a rebuilt turn list. Returns `true` when a grown turn count
    /// forced the cursor back to following.
    pub fn observe(&mut self, turns: &[Turn]) -> bool {
        let grew = turns.len() > self.observed_turns;
        self.observed_turns = turns.len();
        if grew && !self.following_latest {
            self.following_latest = true;
            return true;
        }
        false
    }

    /// Effective position. Manual positions are clamped into range, so a
    /// shorter turn list after a rewind never yields a stale index.
    pub fn position(&self, turns: &[Turn]) -> Option<CursorPosition> {
        let latest = latest_position(turns)?;
        if self.following_latest {
            return Some(latest);
        }
        let turn_index = self.turn_index.min(latest.turn_index);
        let action_index = self
            .action_index
            .min(turns[turn_index].last_action_index());
        Some(CursorPosition::new(turn_index, action_index))
    }

    /// Turn and target under the cursor.
    pub fn current<'a>(&self, turns: &'a [Turn]) -> Option<(&'a Turn, Option<CursorTarget<'a>>)> {
        let pos = self.position(turns)?;
        let turn = &turns[pos.turn_index];
        let target = match turn.decisions.get(pos.action_index) {
            Some(decision) => Some(CursorTarget::Settled(decision)),
            None => turn.pending.as_ref().map(CursorTarget::InFlight),
        };
        Some((turn, target))
    }

    pub fn dispatch(&mut self, command: CursorCommand, turns: &[Turn]) {
        match command {
            CursorCommand::PrevAction => self.step_prev_action(turns),
            CursorCommand::NextAction => self.step_next_action(turns),
            CursorCommand::PrevTurn => self.step_prev_turn(turns),
            CursorCommand::NextTurn => self.step_next_turn(turns),
            CursorCommand::Latest => self.follow_latest(),
            CursorCommand::JumpTo { turn, action } => self.jump_to(turn, action, turns),
            CursorCommand::BackBy(n) => self.step_back(n, turns),
        }
    }

    /// Step back `n` actions. Work is bounded by the actions that exist.
    pub fn step_back(&mut self, n: usize, turns: &[Turn]) {
        for _ in 0..n {
            if !self.has_prev_action(turns) {
                break;
            }
            self.step_prev_action(turns);
        }
    }

    pub fn step_prev_action(&mut self, turns: &[Turn]) {
        let Some(pos) = self.position(turns) else {
            return;
        };
        let target = if pos.action_index > 0 {
            CursorPosition::new(pos.turn_index, pos.action_index - 1)
        } else if pos.turn_index > 0 {
            let prev = pos.turn_index - 1;
            CursorPosition::new(prev, turns[prev].last_action_index())
        } else {
            return;
        };
        self.move_to(target, turns);
    }

    pub fn step_next_action(&mut self, turns: &[Turn]) {
        let Some(pos) = self.position(turns) else {
            return;
        };
        let target = if pos.action_index < turns[pos.turn_index].last_action_index() {
            CursorPosition::new(pos.turn_index, pos.action_index + 1)
        } else if pos.turn_index + 1 < turns.len() {
            CursorPosition::new(pos.turn_index + 1, 0)
        } else {
            return;
        };
        self.move_to(target, turns);
    }

    /// Move to the previous turn's newest action.
    pub fn step_prev_turn(&mut self, turns: &[Turn]) {
        let Some(pos) = self.position(turns) else {
            return;
        };
        if pos.turn_index == 0 {
            return;
        }
        let prev = pos.turn_index - 1;
        self.move_to(
            CursorPosition::new(prev, turns[prev].last_action_index()),
            turns,
        );
    }

    /// Move to the next turn's newest action.
    pub fn step_next_turn(&mut self, turns: &[Turn]) {
        let Some(pos) = self.position(turns) else {
            return;
        };
        let next = pos.turn_index + 1;
        if next >= turns.len() {
            return;
        }
        self.move_to(
            CursorPosition::new(next, turns[next].last_action_index()),
            turns,
        );
    }

    pub fn follow_latest(&mut self) {
        self.following_latest = true;
    }

    /// Jump to an explicit position, clamped into range.
    pub fn jump_to(&mut self, turn: usize, action: usize, turns: &[Turn]) {
        let Some(latest) = latest_position(turns) else {
            return;
        };
        let turn_index = turn.min(latest.turn_index);
        let action_index = action.min(turns[turn_index].last_action_index());
        self.move_to(CursorPosition::new(turn_index, action_index), turns);
    }

    pub fn has_prev_action(&self, turns: &[Turn]) -> bool {
        self.position(turns)
            .is_some_and(|p| p.action_index > 0 || p.turn_index > 0)
    }

    pub fn has_next_action(&self, turns: &[Turn]) -> bool {
        self.position(turns).is_some_and(|p| {
            p.action_index < turns[p.turn_index].last_action_index() || p.turn_index + 1 < turns.len()
        })
    }

    pub fn has_prev_turn(&self, turns: &[Turn]) -> bool {
        self.position(turns).is_some_and(|p| p.turn_index > 0)
    }

    pub fn has_next_turn(&self, turns: &[Turn]) -> bool {
        self.position(turns)
            .is_some_and(|p| p.turn_index + 1 < turns.len())
    }

    /// Arriving on the frontier resumes following; anywhere else is manual.
    fn move_to(&mut self, target: CursorPosition, turns: &[Turn]) {
        self.turn_index = target.turn_index;
        self.action_index = target.action_index;
        self.following_latest = latest_position(turns) == Some(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StreamBuilder;
    use crate::turn::build;
    use serde_json::json;

    /// Turn 1: two decisions. Turn 2: one decision plus a round in flight.
    fn two_turns() -> Vec<Turn> {
        build(
            &StreamBuilder::new()
                .turn(1)
                .round(&["A"], json!(1))
                .round(&["A"], json!(2))
                .turn(2)
                .round(&["A"], json!(3))
                .consensus(1)
                .pending(0, "A")
                .build(),
        )
    }

    #[test]
    fn test_empty_turns_are_no_ops() {
        let mut cursor = NavigationCursor::new();
        assert!(cursor.position(&[]).is_none());
        cursor.step_prev_action(&[]);
        cursor.step_next_turn(&[]);
        assert!(cursor.is_following_latest());
        assert!(!cursor.has_prev_action(&[]));
        assert!(cursor.current(&[]).is_none());
    }

    #[test]
    fn test_following_tracks_in_flight_slot() {
        let turns = two_turns();
        let cursor = NavigationCursor::new();

        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(1, 1)));
        let (turn, target) = cursor.current(&turns).unwrap();
        assert_eq!(turn.ordinal, 2);
        assert!(matches!(target, Some(CursorTarget::InFlight(_))));
    }

    #[test]
    fn test_step_back_crosses_turn_boundary() {
        let turns = two_turns();
        let mut cursor = NavigationCursor::new();

        cursor.step_prev_action(&turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(1, 0)));
        assert!(!cursor.is_following_latest());

        cursor.step_prev_action(&turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(0, 1)));

        cursor.step_prev_action(&turns);
        cursor.step_prev_action(&turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(0, 0)));
        assert!(!cursor.has_prev_action(&turns));
        assert!(cursor.has_next_action(&turns));
    }

    #[test]
    fn test_back_by_huge_count_stops_at_oldest() {
        let turns = two_turns();
        let mut cursor = NavigationCursor::new();

        cursor.dispatch(CursorCommand::BackBy(2), &turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(0, 1)));

        cursor.dispatch(CursorCommand::BackBy(usize::MAX), &turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(0, 0)));
        assert!(!cursor.is_following_latest());
    }

    #[test]
    fn test_step_forward_resumes_following_at_frontier() {
        let turns = two_turns();
        let mut cursor = NavigationCursor::new();
        cursor.jump_to(0, 1, &turns);
        assert!(!cursor.is_following_latest());

        cursor.step_next_action(&turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(1, 0)));
        assert!(!cursor.is_following_latest());

        cursor.step_next_action(&turns);
        assert!(cursor.is_following_latest());
        assert!(!cursor.has_next_action(&turns));

        // at the frontier, stepping forward is a no-op
        cursor.step_next_action(&turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(1, 1)));
    }

    #[test]
    fn test_turn_steps_land_on_last_action() {
        let turns = two_turns();
        let mut cursor = NavigationCursor::new();

        cursor.dispatch(CursorCommand::PrevTurn, &turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(0, 1)));
        assert!(!cursor.has_prev_turn(&turns));
        assert!(cursor.has_next_turn(&turns));

        cursor.dispatch(CursorCommand::NextTurn, &turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(1, 1)));
        assert!(cursor.is_following_latest());
    }

    #[test]
    fn test_auto_follow_as_stream_grows() {
        let events = StreamBuilder::new()
            .turn(1)
            .round(&["A", "B"], json!(1))
            .turn(2)
            .round(&["A", "B"], json!(2))
            .subphase("Block: now")
            .consensus(2)
            .pending(0, "A")
            .complete(0, 5, json!(3))
            .settle()
            .build();

        let mut cursor = NavigationCursor::new();
        for len in 0..=events.len() {
            let turns = build(&events[..len]);
            cursor.observe(&turns);
            assert_eq!(cursor.position(&turns), latest_position(&turns), "at {len}");
        }
    }

    #[test]
    fn test_new_turn_resets_manual_override() {
        let stream = StreamBuilder::new()
            .turn(1)
            .round(&["A"], json!(1))
            .turn(2)
            .round(&["A"], json!(2));
        let before = build(stream.events());

        let mut cursor = NavigationCursor::new();
        cursor.observe(&before);
        cursor.step_prev_turn(&before);
        assert!(!cursor.is_following_latest());

        // a new decision within the same turn keeps the override
        let stream = stream.round(&["A"], json!(3));
        let same_turn = build(stream.events());
        assert!(!cursor.observe(&same_turn));
        assert_eq!(cursor.position(&same_turn), Some(CursorPosition::new(0, 0)));

        let grown = build(&stream.turn(3).consensus(1).build());
        assert!(cursor.observe(&grown));
        assert!(cursor.is_following_latest());
        assert_eq!(cursor.position(&grown), Some(CursorPosition::new(2, 0)));
    }

    #[test]
    fn test_rewind_clamps_manual_position() {
        let turns = two_turns();
        let mut cursor = NavigationCursor::new();
        cursor.observe(&turns);
        cursor.step_prev_action(&turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(1, 0)));

        let shorter = &turns[..1];
        assert!(!cursor.observe(shorter));
        assert_eq!(cursor.position(shorter), Some(CursorPosition::new(0, 0)));
        cursor.step_prev_action(shorter);
        assert_eq!(cursor.position(shorter), Some(CursorPosition::new(0, 0)));
    }

    #[test]
    fn test_current_settled_target() {
        let turns = two_turns();
        let mut cursor = NavigationCursor::new();
        cursor.dispatch(CursorCommand::JumpTo { turn: 0, action: 1 }, &turns);

        let (_, target) = cursor.current(&turns).unwrap();
        match target {
            Some(CursorTarget::Settled(decision)) => assert_eq!(decision.step_number, 2),
            other => panic!("unexpected target: {other:?}"),
        }

        cursor.dispatch(CursorCommand::Latest, &turns);
        assert!(cursor.is_following_latest());
    }

    #[test]
    fn test_jump_clamps_out_of_range() {
        let turns = two_turns();
        let mut cursor = NavigationCursor::new();
        cursor.jump_to(9, 9, &turns);
        assert_eq!(cursor.position(&turns), Some(CursorPosition::new(1, 1)));
        assert!(cursor.is_following_latest());
    }
}
