//! Event log adapters.
//!
//! Provides [`JsonlEventSource`], a JSONL file reader that implements the
//! [`EventSource`](decision_log_application::EventSource) port.

mod jsonl_source;

pub use jsonl_source::{JsonlEventSource, parse_line};
