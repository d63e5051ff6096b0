//! Diagnostic event stream
//!
//! The decision-producing pipeline emits an append-only sequence of
//! [`Event`]s describing a committee of workers racing to propose the next
//! game action. This module defines the closed set of kinds the engine
//! understands plus a passthrough for everything else.
//!
//! # Wire shape
//!
//! ```text
//! {"id": 7, "timestamp": "...", "kind": "worker-complete", "payload": {...}}
//! ```
//!
//! Decoding goes through [`RawEvent`] so that an unknown `kind` becomes
//! [`EventKind::Other`] instead of a hard failure, and a known kind with a
//! broken payload surfaces as [`EventDecodeError`] for the caller to log.

pub mod entities;
pub mod payload;

pub use entities::{Event, EventDecodeError, EventId, RawEvent, find_event};
pub use payload::{
    ConsensusBegin, ConsensusCompare, EventKind, SubphaseBegin, TurnBegin, VoteSettled,
    WorkerAborted, WorkerComplete, WorkerPending,
};
