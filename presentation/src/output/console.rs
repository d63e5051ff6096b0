//! Console output formatter for decision frames

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use decision_log_application::{DecisionFrame, Selection};
use decision_log_domain::{
    EventKind, TimingEntry, Turn, VoteGroup, VoteTally, aggregate, max_duration,
};
use serde_json::Value;

const WIDTH: usize = 60;
const BAR_WIDTH: usize = 24;
const ACTION_WIDTH: usize = 48;

/// Formats decision frames for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete frame
    pub fn format(frame: &DecisionFrame) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Decision Log"));
        output.push('\n');

        if frame.turns.is_empty() {
            output.push_str(&format!(
                "\n{} ({} events read)\n",
                "No decisions yet".dimmed(),
                frame.stream_len
            ));
            output.push_str(&Self::footer());
            return output;
        }

        // Turn list
        output.push_str(&Self::section_header("Turns"));
        let current = frame.selection.as_ref().map(|s| s.position.turn_index);
        for (index, turn) in frame.turns.iter().enumerate() {
            output.push_str(&Self::turn_line(turn, current == Some(index)));
        }

        if let (Some(selection), Some(turn)) = (&frame.selection, frame.current_turn()) {
            output.push_str(&Self::selection(turn, selection));
        }

        output.push('\n');
        output.push_str(&Self::navigation(frame));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(frame: &DecisionFrame) -> String {
        serde_json::to_string_pretty(frame).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per decision, oldest first
    pub fn format_summary(frame: &DecisionFrame) -> String {
        let mut output = String::new();

        for turn in &frame.turns {
            for decision in &turn.decisions {
                let tally = aggregate(&decision.worker_statuses, Some(decision.roster_size));
                let (action, votes) = match tally.winner() {
                    Some(w) => (
                        Self::action_label(&w.action),
                        format!("{}/{}", w.vote_count, tally.total_expected),
                    ),
                    None => ("-".to_string(), format!("0/{}", tally.total_expected)),
                };
                output.push_str(&format!(
                    "{:<16} step {:>2}  {}  {:>5}  {}\n",
                    turn.title(),
                    decision.step_number,
                    tally.vote_summary(),
                    votes,
                    action
                ));
            }
            if let Some(pending) = &turn.pending {
                let tally = aggregate(&pending.workers.snapshot(), Some(pending.roster_size));
                output.push_str(&format!(
                    "{:<16} step {:>2}  {}  {}\n",
                    turn.title(),
                    turn.decisions.len() + 1,
                    tally.vote_summary(),
                    "in flight".yellow()
                ));
            }
        }

        if output.is_empty() {
            output.push_str("No decisions yet\n");
        }
        output
    }

    fn turn_line(turn: &Turn, selected: bool) -> String {
        let marker = if selected { ">".cyan().bold() } else { " ".normal() };
        let count = match turn.decisions.len() {
            1 => "1 decision".to_string(),
            n => format!("{} decisions", n),
        };
        let title = format!("{:<20}", turn.title());
        let title = if selected { title.bold() } else { title.normal() };
        let flight = if turn.is_pending() {
            format!(" {}", "(in flight)".yellow())
        } else {
            String::new()
        };
        format!("{} {} {}{}\n", marker, title, count.dimmed(), flight)
    }

    fn selection(turn: &Turn, selection: &Selection) -> String {
        let mut output = String::new();

        let title = format!("{} - Step {}", turn.title(), selection.step_number);
        output.push_str(&Self::section_header(&title));

        match &selection.decision_id {
            Some(id) => output.push_str(&format!("{} {}\n", "Decision:".cyan().bold(), id)),
            None => output.push_str(&format!(
                "{} {}\n",
                "Decision:".cyan().bold(),
                "in flight".yellow()
            )),
        }
        if let Some(actor) = &turn.actor {
            output.push_str(&format!("{} {}\n", "Actor:".cyan().bold(), actor));
        }

        output.push_str(&Self::votes(&selection.tally, selection.quorum_reached, selection.in_flight));
        output.push_str(&Self::timings(&selection.timings));

        if let Some(detail) = &selection.detail
            && let EventKind::ConsensusCompare(compare) = &detail.kind
        {
            output.push_str(&Self::section_header("Compare Detail"));
            let pretty = serde_json::to_string_pretty(&compare.detail)
                .unwrap_or_else(|_| compare.detail.to_string());
            output.push_str(&Self::indent(&pretty, "  "));
            output.push('\n');
        }

        output
    }

    fn votes(tally: &VoteTally, quorum_reached: bool, in_flight: bool) -> String {
        let mut output = format!(
            "{} {} {}/{} voted\n",
            "Votes:".cyan().bold(),
            tally.vote_summary(),
            tally.votes_cast(),
            tally.total_expected
        );

        if tally.groups.is_empty() {
            output.push_str(&format!("  {}\n", "No votes yet".dimmed()));
        }
        for group in &tally.groups {
            output.push_str(&Self::group_line(tally, group));
        }

        let mut notes = Vec::new();
        if tally.failed > 0 {
            notes.push(format!("{} failed", tally.failed).red().to_string());
        }
        if tally.aborted > 0 {
            notes.push(format!("{} aborted", tally.aborted).dimmed().to_string());
        }
        if tally.pending > 0 {
            notes.push(format!("{} running", tally.pending).yellow().to_string());
        }
        if !notes.is_empty() {
            output.push_str(&format!("  {}\n", notes.join(", ")));
        }

        if !tally.groups.is_empty() {
            let quorum = match (quorum_reached, in_flight) {
                (true, _) => "reached".green(),
                (false, true) => "not yet".yellow(),
                (false, false) => "not reached".red(),
            };
            output.push_str(&format!("{} {}\n", "Quorum:".cyan().bold(), quorum));
        }

        output
    }

    fn group_line(tally: &VoteTally, group: &VoteGroup) -> String {
        let share = format!(
            "{}/{} ({:.0}%)",
            group.vote_count,
            tally.total_expected,
            tally.share(group) * 100.0
        );
        let action = Self::action_label(&group.action);
        let share = format!("{:<14}", share);
        let (mark, action) = if group.is_winner {
            ("*".green().bold(), action.green().bold())
        } else if !group.is_valid {
            ("x".red(), action.red().strikethrough())
        } else {
            ("-".normal(), action.normal())
        };
        format!(
            "  {} {} {}  {}\n",
            mark,
            share,
            action,
            group.voter_names.join(", ").dimmed()
        )
    }

    fn timings(entries: &[TimingEntry]) -> String {
        if entries.is_empty() {
            return String::new();
        }

        let mut output = Self::section_header("Timings");
        let max = max_duration(entries);
        let name_width = entries.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);

        for entry in entries {
            let bar = format!("{:<width$}", Self::bar(entry.duration_ms, max), width = BAR_WIDTH);
            let bar = if entry.failed {
                bar.red()
            } else if entry.aborted {
                bar.dimmed()
            } else if entry.pending {
                bar.yellow()
            } else {
                bar.green()
            };
            let tag = if entry.failed {
                " failed".red().to_string()
            } else if entry.aborted {
                " aborted".dimmed().to_string()
            } else if entry.pending {
                " ...".yellow().to_string()
            } else {
                String::new()
            };
            output.push_str(&format!(
                "  {:<width$} {} {:>7}{}\n",
                entry.name,
                bar,
                Self::duration(entry.duration_ms),
                tag,
                width = name_width
            ));
        }

        output
    }

    fn navigation(frame: &DecisionFrame) -> String {
        let nav = &frame.navigation;
        let item = |label: &str, enabled: bool| {
            if enabled {
                label.normal().to_string()
            } else {
                label.dimmed().to_string()
            }
        };
        let mode = if frame.following_latest {
            "following latest".green()
        } else {
            "paused".yellow()
        };
        format!(
            "{}  {}  {}  {}   [{}]\n",
            item("<< turn", nav.has_prev_turn),
            item("< step", nav.has_prev_action),
            item("step >", nav.has_next_action),
            item("turn >>", nav.has_next_turn),
            mode
        )
    }

    /// Proportional bar; any non-zero duration gets at least one cell.
    pub fn bar(duration_ms: u64, max_ms: u64) -> String {
        if max_ms == 0 {
            return String::new();
        }
        let cells = (duration_ms as f64 / max_ms as f64 * BAR_WIDTH as f64).round() as usize;
        let cells = if duration_ms > 0 { cells.max(1) } else { 0 };
        "#".repeat(cells.min(BAR_WIDTH))
    }

    /// "850ms" below a second, "1.2s" above.
    pub fn duration(ms: u64) -> String {
        if ms < 1000 {
            format!("{}ms", ms)
        } else {
            format!("{:.1}s", ms as f64 / 1000.0)
        }
    }

    /// Compact single-line rendering of a proposed action.
    pub fn action_label(action: &Value) -> String {
        let text = match action {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if text.chars().count() <= ACTION_WIDTH {
            return text;
        }
        let mut truncated: String = text.chars().take(ACTION_WIDTH - 3).collect();
        truncated.push_str("...");
        truncated
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(WIDTH);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(WIDTH).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, frame: &DecisionFrame) -> String {
        Self::format(frame)
    }

    fn format_json(&self, frame: &DecisionFrame) -> String {
        Self::format_json(frame)
    }

    fn format_summary(&self, frame: &DecisionFrame) -> String {
        Self::format_summary(frame)
    }
}
