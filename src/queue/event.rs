//! Event type buffered by the per-request queue
//!
//! An event is a (collection, payload) pair. Nothing is validated when an
//! event is built or pushed; validity is checked by the drain step, which
//! only forwards deliverable events.

use serde::Serialize;
use serde_json::Value;

/// One analytics record destined for a named collection
///
/// # Example
///
/// ```rust
/// use reqevents::queue::Event;
/// use serde_json::json;
///
/// let event = Event::new("purchases", json!({"item": "book"}));
/// assert!(event.is_deliverable());
///
/// let blank = Event::new("", json!({"item": "pen"}));
/// assert!(!blank.is_deliverable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Target collection in the remote analytics service
    pub collection: String,
    /// Event body; `None` when the producer supplied no value
    pub payload: Option<Value>,
}

impl Event {
    pub fn new(collection: impl Into<String>, payload: impl Into<Option<Value>>) -> Self {
        Self {
            collection: collection.into(),
            payload: payload.into(),
        }
    }

    /// True when the collection is non-empty and a payload is present
    pub fn is_deliverable(&self) -> bool {
        !self.collection.is_empty() && self.payload.is_some()
    }

    /// Split into parts, returning `None` for events the sender must not see
    pub fn into_deliverable(self) -> Option<(String, Value)> {
        if self.collection.is_empty() {
            return None;
        }
        self.payload.map(|payload| (self.collection, payload))
    }
}
