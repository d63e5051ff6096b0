//! Event envelope types

use super::payload::EventKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Position of an event in the stream, assigned by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Failure to interpret a raw record as an [`Event`].
///
/// Only raised for recognized kinds; unknown kinds decode to
/// [`EventKind::Other`].
#[derive(Error, Debug)]
pub enum EventDecodeError {
    #[error("malformed '{kind}' payload for event {id}: {source}")]
    MalformedPayload {
        id: EventId,
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Undecoded event as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

/// A single immutable entry of the event stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
}

impl Event {
    pub fn new(id: impl Into<EventId>, timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Self {
            id: id.into(),
            timestamp,
            kind,
        }
    }

    /// Decode a wire record.
    pub fn decode(raw: RawEvent) -> Result<Self, EventDecodeError> {
        let RawEvent {
            id,
            timestamp,
            kind,
            payload,
        } = raw;

        let decoded = EventKind::from_parts(&kind, payload).map_err(|source| {
            EventDecodeError::MalformedPayload {
                id,
                kind: kind.clone(),
                source,
            }
        })?;

        Ok(Self::new(id, timestamp, decoded))
    }

    /// Encode back into the wire record.
    pub fn to_raw(&self) -> RawEvent {
        RawEvent {
            id: self.id,
            timestamp: self.timestamp,
            kind: self.kind.name().to_string(),
            payload: self.kind.payload(),
        }
    }

    /// Whether this event carries the round's compare detail.
    pub fn is_compare(&self) -> bool {
        matches!(self.kind, EventKind::ConsensusCompare(_))
    }
}

/// Look up an event by id in an ordered stream.
///
/// Ids are expected to be increasing, so a binary search is tried first;
/// a linear scan covers producers that do not guarantee that.
pub fn find_event(events: &[Event], id: EventId) -> Option<&Event> {
    if let Ok(idx) = events.binary_search_by_key(&id, |e| e.id) {
        return Some(&events[idx]);
    }
    events.iter().find(|e| e.id == id)
}
