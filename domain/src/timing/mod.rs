//! Per-worker timing for relative comparison
//!
//! [`timings`] turns a round's statuses (live or frozen) into display
//! entries. Running workers grow with `now`. An aborted worker keeps pace
//! with the slowest non-aborted worker while anyone is still running, then
//! freezes at that maximum.

use crate::worker::WorkerStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One bar of the timing display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingEntry {
    pub slot: usize,
    pub name: String,
    pub duration_ms: u64,
    pub pending: bool,
    pub failed: bool,
    pub aborted: bool,
}

impl TimingEntry {
    /// Display bucket: successful, pending, aborted, failed.
    fn rank(&self) -> u8 {
        if self.failed {
            3
        } else if self.aborted {
            2
        } else if self.pending {
            1
        } else {
            0
        }
    }
}

/// Compute timing entries for `statuses` as of `now`, in display order.
pub fn timings(statuses: &[WorkerStatus], now: DateTime<Utc>) -> Vec<TimingEntry> {
    let live = statuses.iter().filter(|s| !s.is_aborted());
    let any_running = statuses.iter().any(|s| !s.completed);
    let leader_ms = live
        .map(|s| observed_ms(s, now))
        .max();

    let mut entries: Vec<TimingEntry> = statuses
        .iter()
        .map(|status| {
            let base = TimingEntry {
                slot: status.slot,
                name: status.display_name.clone(),
                duration_ms: observed_ms(status, now),
                pending: false,
                failed: false,
                aborted: false,
            };

            if !status.completed {
                TimingEntry {
                    pending: true,
                    ..base
                }
            } else if status.is_aborted() {
                let own = base.duration_ms;
                TimingEntry {
                    duration_ms: leader_ms.map_or(own, |leader| leader.max(own)),
                    pending: any_running,
                    aborted: true,
                    ..base
                }
            } else {
                TimingEntry {
                    failed: status.success == Some(false),
                    ..base
                }
            }
        })
        .collect();

    entries.sort_by(display_order);
    entries
}

/// Longest duration among entries, for scaling bars (0 when empty).
pub fn max_duration(entries: &[TimingEntry]) -> u64 {
    entries.iter().map(|e| e.duration_ms).max().unwrap_or(0)
}

/// Recorded duration once terminal, elapsed time while running.
fn observed_ms(status: &WorkerStatus, now: DateTime<Utc>) -> u64 {
    if status.completed {
        status.duration_ms.unwrap_or(0)
    } else {
        status.elapsed_ms(now)
    }
}

fn display_order(a: &TimingEntry, b: &TimingEntry) -> Ordering {
    a.rank()
        .cmp(&b.rank())
        .then(a.duration_ms.cmp(&b.duration_ms))
        .then(a.slot.cmp(&b.slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::t0;
    use chrono::Duration;

    fn at(ms: i64) -> DateTime<Utc> {
        t0() + Duration::milliseconds(ms)
    }

    fn running(slot: usize, name: &str) -> WorkerStatus {
        WorkerStatus::pending(slot, name, t0())
    }

    fn done(slot: usize, name: &str, ms: u64) -> WorkerStatus {
        WorkerStatus {
            completed: true,
            duration_ms: Some(ms),
            success: Some(true),
            proposed_action: Some(serde_json::json!("X")),
            ..running(slot, name)
        }
    }

    fn failed(slot: usize, name: &str, ms: u64) -> WorkerStatus {
        WorkerStatus {
            success: Some(false),
            proposed_action: None,
            ..done(slot, name, ms)
        }
    }

    fn aborted(slot: usize, name: &str, ms: u64) -> WorkerStatus {
        WorkerStatus {
            completed: true,
            duration_ms: Some(ms),
            aborted: Some(true),
            ..running(slot, name)
        }
    }

    #[test]
    fn test_running_worker_grows_with_now() {
        let statuses = vec![running(0, "A")];
        assert_eq!(timings(&statuses, at(40))[0].duration_ms, 40);
        let later = timings(&statuses, at(90));
        assert_eq!(later[0].duration_ms, 90);
        assert!(later[0].pending);
    }

    #[test]
    fn test_aborted_tracks_leader_while_running() {
        let statuses = vec![running(0, "A"), aborted(1, "B", 80)];
        let entries = timings(&statuses, at(95));

        let b = entries.iter().find(|e| e.slot == 1).unwrap();
        assert!(b.aborted);
        assert!(b.pending);
        assert_eq!(b.duration_ms, 95);
    }

    #[test]
    fn test_aborted_freezes_once_leader_settles() {
        let statuses = vec![done(0, "A", 100), aborted(1, "B", 80)];
        let entries = timings(&statuses, at(5_000));

        let b = entries.iter().find(|e| e.slot == 1).unwrap();
        assert!(b.aborted);
        assert!(!b.pending);
        assert_eq!(b.duration_ms, 100);
    }

    #[test]
    fn test_aborted_alone_keeps_own_duration() {
        let entries = timings(&[aborted(0, "A", 70)], at(1_000));
        assert_eq!(entries[0].duration_ms, 70);
        assert!(!entries[0].pending);
    }

    #[test]
    fn test_failed_flag() {
        let entries = timings(&[failed(0, "A", 30)], at(0));
        assert!(entries[0].failed);
        assert!(!entries[0].aborted);
    }

    #[test]
    fn test_display_order() {
        let statuses = vec![
            failed(0, "fail", 5),
            aborted(1, "abort", 10),
            running(2, "run"),
            done(3, "slow", 300),
            done(4, "fast", 100),
        ];
        let entries = timings(&statuses, at(50));
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["fast", "slow", "run", "abort", "fail"]);
    }

    #[test]
    fn test_display_order_is_deterministic_on_ties() {
        let statuses = vec![done(2, "C", 100), done(0, "A", 100), done(1, "B", 100)];
        let entries = timings(&statuses, at(0));
        let slots: Vec<_> = entries.iter().map(|e| e.slot).collect();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn test_max_duration() {
        assert_eq!(max_duration(&[]), 0);
        let entries = timings(&[done(0, "A", 10), done(1, "B", 250)], at(0));
        assert_eq!(max_duration(&entries), 250);
    }
}
