//! Application layer for decision-log
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EngineConfig, WatchParams};
pub use ports::{
    event_source::{EventSource, EventSourceError},
    frame_observer::{FrameObserver, NoFrameObserver},
};
pub use use_cases::build_frame::{DecisionFrame, NavigationState, Selection};
pub use use_cases::inspect_log::{InspectLogError, InspectLogInput, InspectLogUseCase};
pub use use_cases::watch_log::{WatchDecisionLogUseCase, WatchError};
