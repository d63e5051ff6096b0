//! Per-kind event payloads

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Start of an actor's main turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnBegin {
    /// Turn number as reported by the game, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_turn: Option<u32>,
    /// Who is acting this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

/// Start of a decision episode outside the main turn (e.g. a forced response).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubphaseBegin {
    /// Prompt text shown to the workers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Declared episode type (e.g. "block", "discard")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_type: Option<String>,
}

/// A new racing round starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsensusBegin {
    /// Number of workers expected to answer
    #[serde(default)]
    pub roster_size: usize,
    /// Game-state snapshot the workers were given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<Value>,
}

/// One worker has started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerPending {
    pub slot: usize,
    pub name: String,
    /// Defaults to the event timestamp when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
}

/// One worker has finished (successfully or not).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerComplete {
    pub slot: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub duration_ms: u64,
    pub success: bool,
    /// Proposed action; absent when the worker produced nothing usable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aborted: Option<bool>,
}

/// One worker was stopped administratively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerAborted {
    pub slot: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub duration_ms: u64,
}

/// Timing/compare detail for the current round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsensusCompare {
    #[serde(default)]
    pub detail: Value,
}

/// The round has a result and becomes immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteSettled {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_id: Option<String>,
}

/// Closed set of event kinds understood by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    TurnBegin(TurnBegin),
    SubphaseBegin(SubphaseBegin),
    ConsensusBegin(ConsensusBegin),
    WorkerPending(WorkerPending),
    WorkerComplete(WorkerComplete),
    WorkerAborted(WorkerAborted),
    ConsensusCompare(ConsensusCompare),
    VoteSettled(VoteSettled),
    /// Any kind this engine does not interpret
    Other(String),
}

impl EventKind {
    /// Wire name of this kind.
    pub fn name(&self) -> &str {
        match self {
            EventKind::TurnBegin(_) => "turn-begin",
            EventKind::SubphaseBegin(_) => "subphase-begin",
            EventKind::ConsensusBegin(_) => "consensus-begin",
            EventKind::WorkerPending(_) => "worker-pending",
            EventKind::WorkerComplete(_) => "worker-complete",
            EventKind::WorkerAborted(_) => "worker-aborted",
            EventKind::ConsensusCompare(_) => "consensus-compare",
            EventKind::VoteSettled(_) => "vote-settled",
            EventKind::Other(name) => name,
        }
    }

    /// Decode a payload for the given wire name.
    ///
    /// A `null` payload is treated as an empty object so kinds whose fields
    /// are all optional still decode.
    pub fn from_parts(kind: &str, payload: Value) -> Result<Self, serde_json::Error> {
        let payload = match payload {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        Ok(match kind {
            "turn-begin" => EventKind::TurnBegin(decode(payload)?),
            "subphase-begin" => EventKind::SubphaseBegin(decode(payload)?),
            "consensus-begin" => EventKind::ConsensusBegin(decode(payload)?),
            "worker-pending" => EventKind::WorkerPending(decode(payload)?),
            "worker-complete" => EventKind::WorkerComplete(decode(payload)?),
            "worker-aborted" => EventKind::WorkerAborted(decode(payload)?),
            "consensus-compare" => EventKind::ConsensusCompare(decode(payload)?),
            "vote-settled" => EventKind::VoteSettled(decode(payload)?),
            other => EventKind::Other(other.to_string()),
        })
    }

    /// Encode the payload back to JSON. Passthrough kinds encode as `null`.
    pub fn payload(&self) -> Value {
        let encoded = match self {
            EventKind::TurnBegin(p) => serde_json::to_value(p),
            EventKind::SubphaseBegin(p) => serde_json::to_value(p),
            EventKind::ConsensusBegin(p) => serde_json::to_value(p),
            EventKind::WorkerPending(p) => serde_json::to_value(p),
            EventKind::WorkerComplete(p) => serde_json::to_value(p),
            EventKind::WorkerAborted(p) => serde_json::to_value(p),
            EventKind::ConsensusCompare(p) => serde_json::to_value(p),
            EventKind::VoteSettled(p) => serde_json::to_value(p),
            EventKind::Other(_) => Ok(Value::Null),
        };
        encoded.unwrap_or(Value::Null)
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload)
}
