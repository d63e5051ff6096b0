//! Inspect Log use case
//!
//! One-shot view of a decision log: read everything, fold it, apply
//! navigation commands and project a single frame.

use crate::config::EngineConfig;
use crate::ports::event_source::{EventSource, EventSourceError};
use crate::use_cases::build_frame::DecisionFrame;
use chrono::{DateTime, Utc};
use decision_log_domain::{CursorCommand, DecisionLogBuilder, NavigationCursor};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while inspecting a log
#[derive(Error, Debug)]
pub enum InspectLogError {
    #[error("Event source error: {0}")]
    Source(#[from] EventSourceError),
}

/// Input for the InspectLog use case
#[derive(Debug, Clone)]
pub struct InspectLogInput {
    /// Navigation applied in order, starting from the latest action
    pub commands: Vec<CursorCommand>,
    /// Reference time for live timers
    pub now: DateTime<Utc>,
}

impl InspectLogInput {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            commands: Vec::new(),
            now,
        }
    }

    pub fn with_command(mut self, command: CursorCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn with_commands(mut self, commands: impl IntoIterator<Item = CursorCommand>) -> Self {
        self.commands.extend(commands);
        self
    }
}

/// Use case for rendering a single frame of a decision log
pub struct InspectLogUseCase<S: EventSource + 'static> {
    source: Arc<S>,
    config: EngineConfig,
}

impl<S: EventSource + 'static> InspectLogUseCase<S> {
    pub fn new(source: Arc<S>, config: EngineConfig) -> Self {
        Self { source, config }
    }

    pub async fn execute(&self, input: InspectLogInput) -> Result<DecisionFrame, InspectLogError> {
        let events = self.source.read_all().await?;
        let turns = DecisionLogBuilder::new(self.config.builder)
            .with_events(&events)
            .into_turns();

        info!(
            "Loaded {} events into {} turns",
            events.len(),
            turns.len()
        );

        let mut cursor = NavigationCursor::new();
        cursor.observe(&turns);
        for command in &input.commands {
            debug!("Applying {:?}", command);
            cursor.dispatch(*command, &turns);
        }

        Ok(DecisionFrame::project(
            &events,
            turns,
            &cursor,
            &self.config,
            input.now,
        ))
    }
}
