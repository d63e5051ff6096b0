//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`EngineConfig`]: how events are folded and tallies judged
//! - [`WatchParams`]: polling cadence for live watching

pub mod engine_config;
pub mod watch_params;

pub use engine_config::EngineConfig;
pub use watch_params::WatchParams;
