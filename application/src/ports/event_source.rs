//! Event source port
//!
//! Defines how the application layer obtains the event stream. The engine
//! only requires total ordering and immutability of already-emitted
//! entries; the transport is up to the adapter.

use async_trait::async_trait;
use decision_log_domain::Event;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading events
#[derive(Error, Debug)]
pub enum EventSourceError {
    #[error("Could not read event log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of the append-only event stream
///
/// Individual malformed entries are the adapter's concern: it skips and
/// logs them rather than failing the whole read.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Every event from the start of the stream. Resets the read position.
    async fn read_all(&self) -> Result<Vec<Event>, EventSourceError>;

    /// Events appended since the previous read.
    async fn read_new(&self) -> Result<Vec<Event>, EventSourceError>;
}
