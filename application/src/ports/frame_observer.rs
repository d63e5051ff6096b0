//! Frame observer port
//!
//! Receives each frame produced while watching a decision log.
//! Implementations live in the presentation layer.

use crate::use_cases::build_frame::DecisionFrame;
use decision_log_domain::{Decision, Turn};

/// Callback for frames produced by the watch loop
pub trait FrameObserver: Send + Sync {
    /// Called with every rebuilt frame
    fn on_frame(&self, frame: &DecisionFrame);

    /// Called once per decision that settled while watching
    fn on_round_settled(&self, _turn: &Turn, _decision: &Decision) {}

    /// Called with the final frame when watching stops
    fn on_watch_end(&self, _frame: &DecisionFrame) {}
}

/// No-op observer for when nothing needs to be displayed
pub struct NoFrameObserver;

impl FrameObserver for NoFrameObserver {
    fn on_frame(&self, _frame: &DecisionFrame) {}
}
