//! Worker status records

use crate::event::{WorkerAborted, WorkerComplete, WorkerPending};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Status of one worker within one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerStatus {
    pub slot: usize,
    pub display_name: String,
    pub start_time: DateTime<Utc>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_action: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<bool>,
}

impl WorkerStatus {
    /// A freshly started worker.
    pub fn pending(slot: usize, display_name: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            slot,
            display_name: display_name.into(),
            start_time,
            completed: false,
            duration_ms: None,
            success: None,
            proposed_action: None,
            aborted: None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted == Some(true)
    }

    /// Still running: not yet terminal.
    pub fn is_running(&self) -> bool {
        !self.completed
    }

    /// Completed, not aborted, not failed, and proposed something.
    pub fn is_vote(&self) -> bool {
        self.completed
            && !self.is_aborted()
            && self.success != Some(false)
            && self.proposed_action.is_some()
    }

    /// Completed without being aborted but produced no usable proposal.
    pub fn is_failed(&self) -> bool {
        self.completed
            && !self.is_aborted()
            && (self.success == Some(false) || self.proposed_action.is_none())
    }

    /// Elapsed time as of `now` for a running worker, never negative.
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        (now - self.start_time).num_milliseconds().max(0) as u64
    }
}

/// Slot-indexed status mapping for one in-flight round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerRoster {
    workers: BTreeMap<usize, WorkerStatus>,
}

impl WorkerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&WorkerStatus> {
        self.workers.get(&slot)
    }

    /// Statuses in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &WorkerStatus> {
        self.workers.values()
    }

    /// Whether any worker is still running.
    pub fn any_running(&self) -> bool {
        self.workers.values().any(WorkerStatus::is_running)
    }

    /// Value copy of every status in slot order.
    pub fn snapshot(&self) -> Vec<WorkerStatus> {
        self.workers.values().cloned().collect()
    }

    /// Record a worker start. A repeated start for a slot that is already
    /// tracked is ignored, so a terminal status is never reopened.
    pub fn on_pending(&mut self, event: &WorkerPending, at: DateTime<Utc>) {
        if self.workers.contains_key(&event.slot) {
            debug!(slot = event.slot, "duplicate worker-pending ignored");
            return;
        }
        let start = event.start_time.unwrap_or(at);
        self.workers
            .insert(event.slot, WorkerStatus::pending(event.slot, &event.name, start));
    }

    /// Record a worker finishing.
    pub fn on_complete(&mut self, event: &WorkerComplete, at: DateTime<Utc>) {
        let status = self.entry(event.slot, event.name.as_deref(), event.duration_ms, at);
        if status.completed {
            debug!(slot = event.slot, "worker-complete after terminal state ignored");
            return;
        }
        status.completed = true;
        status.duration_ms = Some(event.duration_ms);
        status.success = Some(event.success);
        status.proposed_action = event.action.clone();
        status.aborted = event.aborted;
    }

    /// Record a worker being stopped administratively.
    pub fn on_aborted(&mut self, event: &WorkerAborted, at: DateTime<Utc>) {
        let status = self.entry(event.slot, event.name.as_deref(), event.duration_ms, at);
        if status.completed {
            debug!(slot = event.slot, "worker-aborted after terminal state ignored");
            return;
        }
        status.completed = true;
        status.duration_ms = Some(event.duration_ms);
        status.aborted = Some(true);
    }

    /// Status for a slot, created on the fly when a terminal event arrives
    /// for a worker whose start was never seen.
    fn entry(
        &mut self,
        slot: usize,
        name: Option<&str>,
        duration_ms: u64,
        at: DateTime<Utc>,
    ) -> &mut WorkerStatus {
        self.workers.entry(slot).or_insert_with(|| {
            let start = i64::try_from(duration_ms)
                .ok()
                .and_then(Duration::try_milliseconds)
                .and_then(|d| at.checked_sub_signed(d))
                .unwrap_or(at);
            let name = name.map_or_else(|| format!("worker {slot}"), str::to_string);
            WorkerStatus::pending(slot, name, start)
        })
    }
}
