//! Progress reporting while watching a decision log

use colored::Colorize;
use decision_log_application::{DecisionFrame, FrameObserver};
use decision_log_domain::{Decision, Turn, aggregate};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// One line describing a settled decision.
fn settled_line(turn: &Turn, decision: &Decision) -> String {
    let tally = aggregate(&decision.worker_statuses, Some(decision.roster_size));
    let winner = tally
        .winner()
        .map(|w| format!("{}/{}", w.vote_count, tally.total_expected))
        .unwrap_or_else(|| "no votes".to_string());
    format!(
        "{} {} step {} {} {}",
        "v".green(),
        turn.title().bold(),
        decision.step_number,
        tally.vote_summary(),
        winner
    )
}

/// Status text for the round in flight, if any.
fn in_flight_message(frame: &DecisionFrame) -> Option<String> {
    let turn = frame.turns.last()?;
    let pending = turn.pending.as_ref()?;
    let tally = aggregate(&pending.workers.snapshot(), Some(pending.roster_size));
    Some(format!(
        "{} step {}: {} {} running",
        turn.title(),
        turn.decisions.len() + 1,
        tally.vote_summary(),
        tally.pending
    ))
}

/// Live spinner for the round in flight, with a line per settled decision
pub struct LiveReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl LiveReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for LiveReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameObserver for LiveReporter {
    fn on_frame(&self, frame: &DecisionFrame) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };

        match in_flight_message(frame) {
            Some(message) => {
                let pb = spinner.get_or_insert_with(|| {
                    let pb = ProgressBar::new_spinner();
                    pb.set_style(Self::spinner_style());
                    pb.set_prefix("Voting");
                    pb.enable_steady_tick(Duration::from_millis(100));
                    pb
                });
                pb.set_message(message);
            }
            None => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
            }
        }
    }

    fn on_round_settled(&self, turn: &Turn, decision: &Decision) {
        let line = settled_line(turn, decision);
        let spinner = self.spinner.lock().ok();
        match spinner.as_ref().and_then(|s| s.as_ref()) {
            Some(pb) => pb.println(line),
            None => eprintln!("{}", line),
        }
    }

    fn on_watch_end(&self, _frame: &DecisionFrame) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl FrameObserver for SimpleProgress {
    fn on_frame(&self, _frame: &DecisionFrame) {}

    fn on_round_settled(&self, turn: &Turn, decision: &Decision) {
        eprintln!("{}", settled_line(turn, decision));
    }
}
