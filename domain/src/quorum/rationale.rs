//! Rationale stripping for vote grouping

use serde_json::Value;

/// Top-level keys holding free-text explanation rather than the action.
pub const RATIONALE_KEYS: &[&str] = &["reasoning", "rationale"];

/// Copy of `action` without its rationale fields.
///
/// Only top-level object keys are removed; non-object actions are returned
/// unchanged. Stripping twice equals stripping once.
pub fn strip_rationale(action: &Value) -> Value {
    match action {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !RATIONALE_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
