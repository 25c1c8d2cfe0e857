//! Internal EventQueue implementation
//!
//! A mutex-guarded `VecDeque` gives O(1) push at the tail and pop at the
//! head. Every operation holds the lock only for its own deque mutation.

use crate::queue::event::Event;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe FIFO of events owned by a single request
///
/// Share it between the tasks of one request with `Arc<EventQueue>`.
/// Popping an empty queue is not an error: `pop` returns `None`.
///
/// # Example
///
/// ```rust
/// use reqevents::queue::EventQueue;
/// use serde_json::json;
///
/// let queue = EventQueue::new();
/// queue.push("purchases", json!({"item": "book"}));
/// queue.push("views", json!({"page": "home"}));
/// assert_eq!(queue.len(), 2);
///
/// let first = queue.pop().unwrap();
/// assert_eq!(first.collection, "purchases");
/// ```
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Mutex<VecDeque<Event>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // A producer that panicked mid-push cannot leave the deque half-written,
    // so the data behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Event>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Append an event at the tail
    pub fn push(&self, collection: impl Into<String>, payload: impl Into<Option<Value>>) {
        self.push_event(Event::new(collection, payload));
    }

    /// Append an already built event at the tail
    pub fn push_event(&self, event: Event) {
        self.lock().push_back(event);
    }

    /// Remove and return the head event, or `None` when the queue is empty
    pub fn pop(&self) -> Option<Event> {
        self.lock().pop_front()
    }

    #[cfg(test)]
    pub(crate) fn events_lock_for_test(&self) -> MutexGuard<'_, VecDeque<Event>> {
        self.lock()
    }
}
