//! Event types for the exporter

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference to the object an event was generated for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    /// Object kind (e.g. "Pod", "Deployment")
    pub kind: String,
    /// Object name
    pub name: String,
    /// Object namespace, empty for cluster-scoped objects
    #[serde(default)]
    pub namespace: String,
    /// Labels attached to the object
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl ObjectReference {
    /// Create a new object reference without labels
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            namespace: namespace.into(),
            labels: HashMap::new(),
        }
    }

    /// Add a label to the object
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Look up a label, returning an empty string when the object lacks it
    pub fn label_or_empty(&self, key: &str) -> &str {
        self.labels.get(key).map(String::as_str).unwrap_or("")
    }
}

/// A cluster lifecycle event
///
/// Each event is self-contained: `count` is the current occurrence count
/// for the `(involved_object, reason)` pair, not a delta.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// The object the event is about
    pub involved_object: ObjectReference,
    /// Short machine-readable reason code (e.g. "Started", "BackOff")
    pub reason: String,
    /// Number of times this event has occurred
    #[serde(default)]
    pub count: i32,
}

impl Event {
    /// Create a new event
    pub fn new(involved_object: ObjectReference, reason: impl Into<String>, count: i32) -> Self {
        Self {
            involved_object,
            reason: reason.into(),
            count,
        }
    }

    /// Parse an event from its JSON representation
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Kind of the involved object
    pub fn kind(&self) -> &str {
        &self.involved_object.kind
    }
}
