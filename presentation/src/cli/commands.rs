//! CLI command definitions

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use decision_log_domain::CursorCommand;
use std::path::PathBuf;

/// Output format for decision frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Turn list, vote breakdown, timings and detail
    Full,
    /// One line per decision
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for decision_log_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for decision-log
#[derive(Parser, Debug)]
#[command(name = "decision-log")]
#[command(author, version, about = "Consensus decision log viewer - Inspect how a worker committee voted")]
#[command(long_about = r#"
decision-log reads the JSONL diagnostic stream of a consensus pipeline and
shows, for each game turn, the decisions a committee of workers voted on:
who proposed what, which proposal won, and how long each worker took.

Navigation starts at the newest decision. --turn/--step jump to a position,
--back steps backwards from there. With --follow the log is watched live
and the view returns to the newest decision whenever a new turn begins.
--wait watches only until the round in flight settles.

Configuration files are loaded from (in priority order):
1. DECISION_LOG_* environment variables
2. --config <path>         Explicit config file
3. ./decision-log.toml     Project-level config
4. ~/.config/decision-log/config.toml   Global config

Example:
  decision-log game.events.jsonl
  decision-log game.events.jsonl --turn 4 --step 2
  decision-log game.events.jsonl --follow --output summary
"#)]
pub struct Cli {
    /// Path to the JSONL event log
    #[arg(value_name = "LOG")]
    pub log: Option<PathBuf>,

    /// Keep watching the log as it grows
    #[arg(short, long)]
    pub follow: bool,

    /// Wait for the round in flight to settle, then print
    #[arg(short, long)]
    pub wait: bool,

    /// Jump to this turn (1-based)
    #[arg(long, value_name = "N")]
    pub turn: Option<usize>,

    /// Step within --turn (1-based; defaults to the newest)
    #[arg(long, value_name = "M", requires = "turn")]
    pub step: Option<usize>,

    /// Step back this many actions from the starting position
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub back: usize,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Reference time for live timers (RFC 3339; defaults to now)
    #[arg(long, value_name = "TIME", value_parser = parse_time)]
    pub now: Option<DateTime<Utc>>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Whether the log should be watched rather than read once.
    pub fn watches(&self) -> bool {
        self.follow || self.wait
    }

    /// Navigation requested on the command line, in application order.
    pub fn cursor_commands(&self) -> Vec<CursorCommand> {
        let mut commands = Vec::new();

        if let Some(turn) = self.turn {
            commands.push(CursorCommand::JumpTo {
                turn: turn.saturating_sub(1),
                // out-of-range steps clamp to the newest action
                action: self.step.map_or(usize::MAX, |s| s.saturating_sub(1)),
            });
        }
        if self.back > 0 {
            commands.push(CursorCommand::BackBy(self.back));
        }

        commands
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 time '{}': {}", value, e))
}
