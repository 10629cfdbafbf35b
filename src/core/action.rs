//! Actions: plain, immutable descriptions of an intended state change.
//!
//! Every action carries a kind tag. The store never inspects anything else;
//! interpreting the rest of an action is the reducer's job.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for values that can be dispatched to a store.
///
/// Actions are plain data. They are never mutated by the store or by
/// reducers, only read.
///
/// # Required Traits
///
/// - `Clone`: a dispatched action is handed back to the caller
/// - `Debug`: actions show up in logs and error messages
/// - `Send` + `Sync`: stores are shareable across threads
///
/// # Example
///
/// ```rust
/// use tally::core::Action;
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Increment,
///     Add(i64),
/// }
///
/// impl Action for CounterAction {
///     fn kind(&self) -> &str {
///         match self {
///             Self::Increment => "INCREMENT",
///             Self::Add(_) => "ADD",
///         }
///     }
/// }
///
/// assert_eq!(CounterAction::Add(3).kind(), "ADD");
/// ```
pub trait Action: Clone + Debug + Send + Sync + 'static {
    /// The action's type tag.
    fn kind(&self) -> &str;
}

/// Schema-less action: a type tag plus an optional JSON payload.
///
/// No validation is performed on the payload. It serializes with the tag
/// under the `"type"` key.
///
/// ```rust
/// use tally::core::{Action, PlainAction};
/// use serde_json::json;
///
/// let action = PlainAction::new("SET_VOLUME").with_payload(json!({ "level": 7 }));
/// assert_eq!(action.kind(), "SET_VOLUME");
/// assert_eq!(action.payload_field("level"), Some(&json!(7)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlainAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl PlainAction {
    /// Create an action with no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    /// Attach a payload, replacing any previous one.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Look up a top-level field of an object payload.
    pub fn payload_field(&self, key: &str) -> Option<&serde_json::Value> {
        self.payload.as_ref().and_then(|p| p.get(key))
    }
}

impl Action for PlainAction {
    fn kind(&self) -> &str {
        &self.kind
    }
}

impl Action for &'static str {
    fn kind(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Start,
        Stop,
        Set(u8),
    }

    impl Action for TestAction {
        fn kind(&self) -> &str {
            match self {
                Self::Start => "START",
                Self::Stop => "STOP",
                Self::Set(_) => "SET",
            }
        }
    }

    #[test]
    fn kind_returns_tag() {
        assert_eq!(TestAction::Start.kind(), "START");
        assert_eq!(TestAction::Stop.kind(), "STOP");
        assert_eq!(TestAction::Set(4).kind(), "SET");
    }

    #[test]
    fn plain_action_without_payload() {
        let action = PlainAction::new("SCREAM");
        assert_eq!(action.kind(), "SCREAM");
        assert!(action.payload.is_none());
        assert!(action.payload_field("anything").is_none());
    }

    #[test]
    fn plain_action_serializes_type_key() {
        let action = PlainAction::new("SCREAM");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json, json!({ "type": "SCREAM" }));
    }

    #[test]
    fn plain_action_accepts_any_payload_shape() {
        let raw = json!({ "type": "ADD", "payload": [1, 2, 3] });
        let action: PlainAction = serde_json::from_value(raw).unwrap();
        assert_eq!(action.kind(), "ADD");
        assert_eq!(action.payload, Some(json!([1, 2, 3])));
        assert!(action.payload_field("level").is_none());
    }

    #[test]
    fn static_str_is_an_action() {
        assert_eq!("MURMUR".kind(), "MURMUR");
    }
}
