//! Turn/decision tree
//!
//! The flat event stream is folded into an ordered list of [`Turn`]s, each
//! holding the [`Decision`]s settled within it plus, for the newest turn
//! only, the state of the round still in flight.
//!
//! ```text
//! turn-begin ──► Turn ─┬─ Decision (step 1)
//!                      ├─ Decision (step 2)
//!                      └─ PendingState (round in flight)
//! ```
//!
//! See [`DecisionLogBuilder`] for the fold itself.

pub mod builder;
pub mod entities;
pub mod label;

pub use builder::{BuilderConfig, DEFAULT_DETAIL_LOOKBACK, DecisionLogBuilder, build, decision_detail};
pub use entities::{Decision, PendingState, Turn};
pub use label::sub_phase_label;
