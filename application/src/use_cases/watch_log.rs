//! Watch Decision Log use case
//!
//! Follows a live decision log. Keeps one incremental builder and one
//! cursor for the whole session and hands every rebuilt frame to a
//! [`FrameObserver`].
//!
//! # Cadence
//!
//! While a round is in flight the source is polled every
//! `refresh_interval` so pending timers stay current. Otherwise it is
//! polled every `idle_interval`, and only new events trigger a frame.
//!
//! # Termination
//!
//! Without `follow` the watch ends as soon as nothing is in flight. A
//! [`CancellationToken`] ends it at the next wait.

use crate::config::{EngineConfig, WatchParams};
use crate::ports::event_source::{EventSource, EventSourceError};
use crate::ports::frame_observer::{FrameObserver, NoFrameObserver};
use crate::use_cases::build_frame::DecisionFrame;
use chrono::Utc;
use decision_log_domain::{
    CursorCommand, DecisionLogBuilder, Event, EventId, NavigationCursor, Turn,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can end a watch
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Event source error: {0}")]
    Source(#[from] EventSourceError),
}

/// Use case for following a decision log as it grows
pub struct WatchDecisionLogUseCase<S: EventSource + 'static> {
    source: Arc<S>,
    config: EngineConfig,
    params: WatchParams,
    cancellation: Option<CancellationToken>,
}

/// Mutable state of one watch session.
struct Session {
    events: Vec<Event>,
    builder: DecisionLogBuilder,
    cursor: NavigationCursor,
    /// Vote events of decisions already reported
    settled: HashSet<EventId>,
}

impl Session {
    fn start(events: Vec<Event>, config: &EngineConfig) -> Self {
        let builder = DecisionLogBuilder::new(config.builder).with_events(&events);
        let turns = builder.snapshot();
        let mut cursor = NavigationCursor::new();
        cursor.observe(&turns);

        Self {
            settled: settled_ids(&turns),
            events,
            builder,
            cursor,
        }
    }

    /// Fold `fresh` in. An id at or below the last known one means the
    /// stream was rewound and `fresh` is the whole new stream.
    fn absorb(&mut self, fresh: Vec<Event>, config: &EngineConfig) {
        let rewound = match (fresh.first(), self.events.last()) {
            (Some(first), Some(last)) => first.id <= last.id,
            _ => false,
        };

        if rewound {
            info!("Event stream rewound; rebuilding from {} events", fresh.len());
            self.builder = DecisionLogBuilder::new(config.builder).with_events(&fresh);
            self.settled = settled_ids(&self.builder.snapshot());
            self.events = fresh;
        } else {
            self.builder.extend(&fresh);
            self.events.extend(fresh);
        }
    }
}

fn settled_ids(turns: &[Turn]) -> HashSet<EventId> {
    turns
        .iter()
        .flat_map(|t| t.decisions.iter().map(|d| d.vote_event_id))
        .collect()
}

impl<S: EventSource + 'static> WatchDecisionLogUseCase<S> {
    pub fn new(source: Arc<S>, config: EngineConfig, params: WatchParams) -> Self {
        Self {
            source,
            config,
            params,
            cancellation: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Execute the use case without an observer
    pub async fn execute(&self, commands: &[CursorCommand]) -> Result<DecisionFrame, WatchError> {
        self.execute_with_observer(commands, &NoFrameObserver).await
    }

    /// Execute the use case, reporting every frame to `observer`.
    ///
    /// `commands` are applied once to the initial cursor. Returns the last
    /// frame produced.
    pub async fn execute_with_observer(
        &self,
        commands: &[CursorCommand],
        observer: &dyn FrameObserver,
    ) -> Result<DecisionFrame, WatchError> {
        let mut session = Session::start(self.source.read_all().await?, &self.config);
        {
            let turns = session.builder.snapshot();
            for command in commands {
                session.cursor.dispatch(*command, &turns);
            }
        }

        info!(
            "Watching decision log ({} events, follow: {})",
            session.events.len(),
            self.params.follow
        );

        let mut frame = self.frame(&session);
        observer.on_frame(&frame);

        loop {
            let in_flight = frame.has_pending();
            if !self.params.follow && !in_flight {
                debug!("No round in flight; ending watch");
                break;
            }

            if self.pause(self.params.interval(in_flight)).await {
                info!("Watch cancelled");
                break;
            }

            let fresh = self.source.read_new().await?;
            if fresh.is_empty() && !in_flight {
                continue;
            }
            if !fresh.is_empty() {
                debug!("Read {} new events", fresh.len());
                session.absorb(fresh, &self.config);
            }

            let turns = session.builder.snapshot();
            if session.cursor.observe(&turns) {
                debug!("New turn arrived; following latest");
            }
            for turn in &turns {
                for decision in &turn.decisions {
                    if session.settled.insert(decision.vote_event_id) {
                        observer.on_round_settled(turn, decision);
                    }
                }
            }

            frame = DecisionFrame::project(
                &session.events,
                turns,
                &session.cursor,
                &self.config,
                Utc::now(),
            );
            observer.on_frame(&frame);
        }

        observer.on_watch_end(&frame);
        Ok(frame)
    }

    fn frame(&self, session: &Session) -> DecisionFrame {
        DecisionFrame::project(
            &session.events,
            session.builder.snapshot(),
            &session.cursor,
            &self.config,
            Utc::now(),
        )
    }

    /// Wait for `interval`. Returns `true` if cancelled first.
    async fn pause(&self, interval: Duration) -> bool {
        match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => true,
                    _ = tokio::time::sleep(interval) => false,
                }
            }
            None => {
                tokio::time::sleep(interval).await;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedSource, events};
    use decision_log_domain::Decision;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        frames: Mutex<Vec<usize>>,
        settled: Mutex<Vec<String>>,
        ended: Mutex<bool>,
    }

    impl FrameObserver for Recorder {
        fn on_frame(&self, frame: &DecisionFrame) {
            self.frames.lock().unwrap().push(frame.stream_len);
        }

        fn on_round_settled(&self, _turn: &Turn, decision: &Decision) {
            self.settled.lock().unwrap().push(decision.id.clone());
        }

        fn on_watch_end(&self, _frame: &DecisionFrame) {
            *self.ended.lock().unwrap() = true;
        }
    }

    fn fast() -> WatchParams {
        WatchParams::default().with_refresh_ms(1).with_idle_ms(1)
    }

    #[tokio::test]
    async fn test_settled_log_ends_immediately() {
        let source = Arc::new(ScriptedSource::new(events::two_worker_round(), vec![]));
        let use_case = WatchDecisionLogUseCase::new(source, EngineConfig::default(), fast());
        let recorder = Recorder::default();

        let frame = use_case
            .execute_with_observer(&[], &recorder)
            .await
            .unwrap();

        assert_eq!(frame.stream_len, 7);
        assert_eq!(*recorder.frames.lock().unwrap(), vec![7]);
        // Decisions present at load are not reported as newly settled
        assert!(recorder.settled.lock().unwrap().is_empty());
        assert!(*recorder.ended.lock().unwrap());
    }

    #[tokio::test]
    async fn test_watch_until_round_settles() {
        let source = Arc::new(ScriptedSource::new(
            events::round_in_flight(),
            vec![
                vec![],
                vec![events::complete(4, 0, 100, "X")],
                vec![events::settle(5)],
            ],
        ));
        let use_case = WatchDecisionLogUseCase::new(source, EngineConfig::default(), fast());
        let recorder = Recorder::default();

        let frame = use_case
            .execute_with_observer(&[], &recorder)
            .await
            .unwrap();

        assert_eq!(*recorder.frames.lock().unwrap(), vec![3, 3, 4, 5]);
        assert_eq!(*recorder.settled.lock().unwrap(), vec!["5".to_string()]);
        assert!(!frame.has_pending());
        assert_eq!(frame.turns[0].decisions.len(), 1);
    }

    #[tokio::test]
    async fn test_cancellation_stops_follow() {
        let source = Arc::new(ScriptedSource::new(events::two_worker_round(), vec![]));
        let token = CancellationToken::new();
        token.cancel();
        let use_case = WatchDecisionLogUseCase::new(
            source,
            EngineConfig::default(),
            fast().with_follow(true),
        )
        .with_cancellation(token);

        let frame = use_case.execute(&[]).await.unwrap();
        assert_eq!(frame.stream_len, 7);
    }

    #[tokio::test]
    async fn test_new_turn_resumes_following() {
        let mut initial = events::two_worker_round();
        initial.extend(events::single_vote_turn(8, 2, "Y"));
        let source = Arc::new(ScriptedSource::new(
            initial,
            vec![events::single_vote_turn(13, 3, "Z")],
        ));
        let token = CancellationToken::new();
        let use_case = WatchDecisionLogUseCase::new(
            source,
            EngineConfig::default(),
            fast().with_follow(true),
        )
        .with_cancellation(token.clone());

        struct StopAfter(CancellationToken, Mutex<Vec<bool>>);
        impl FrameObserver for StopAfter {
            fn on_frame(&self, frame: &DecisionFrame) {
                self.1.lock().unwrap().push(frame.following_latest);
                if frame.stream_len == 17 {
                    self.0.cancel();
                }
            }
        }

        let observer = StopAfter(token, Mutex::new(Vec::new()));
        let frame = use_case
            .execute_with_observer(&[CursorCommand::JumpTo { turn: 0, action: 0 }], &observer)
            .await
            .unwrap();

        assert_eq!(*observer.1.lock().unwrap(), vec![false, true]);
        assert!(frame.following_latest);
        assert_eq!(frame.selection.unwrap().position.turn_index, 2);
    }

    #[tokio::test]
    async fn test_rewound_stream_rebuilds() {
        let source = Arc::new(ScriptedSource::new(
            events::two_worker_round(),
            vec![vec![events::turn(1, 9)]],
        ));
        let token = CancellationToken::new();
        let use_case = WatchDecisionLogUseCase::new(
            source,
            EngineConfig::default(),
            fast().with_follow(true),
        )
        .with_cancellation(token.clone());

        struct StopOnShrink(CancellationToken);
        impl FrameObserver for StopOnShrink {
            fn on_frame(&self, frame: &DecisionFrame) {
                if frame.stream_len == 1 {
                    self.0.cancel();
                }
            }
        }

        let frame = use_case
            .execute_with_observer(&[], &StopOnShrink(token))
            .await
            .unwrap();

        assert_eq!(frame.stream_len, 1);
        assert!(frame.turns.is_empty());
    }

    #[tokio::test]
    async fn test_rewound_stream_reports_reused_vote_ids() {
        let source = Arc::new(ScriptedSource::new(
            events::two_worker_round(),
            vec![
                vec![events::turn(1, 1), events::consensus(2, 1), events::pending(3, 0, "A")],
                vec![events::complete(4, 0, 10, "Y"), events::settle(7)],
            ],
        ));
        let token = CancellationToken::new();
        let use_case = WatchDecisionLogUseCase::new(
            source,
            EngineConfig::default(),
            fast().with_follow(true),
        )
        .with_cancellation(token.clone());

        struct StopAtSettle(CancellationToken, Mutex<Vec<String>>);
        impl FrameObserver for StopAtSettle {
            fn on_frame(&self, frame: &DecisionFrame) {
                if frame.stream_len == 5 {
                    self.0.cancel();
                }
            }

            fn on_round_settled(&self, _turn: &Turn, decision: &Decision) {
                self.1.lock().unwrap().push(decision.id.clone());
            }
        }

        let observer = StopAtSettle(token, Mutex::new(Vec::new()));
        let frame = use_case.execute_with_observer(&[], &observer).await.unwrap();

        assert_eq!(frame.stream_len, 5);
        assert_eq!(*observer.1.lock().unwrap(), vec!["7".to_string()]);
    }
}
