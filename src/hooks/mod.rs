//! Request lifecycle hooks for analytics events
//!
//! `on_request_start` attaches a fresh `EventQueue` to the request context;
//! application code records events on it while the request is handled;
//! `on_request_end` drains it into the injected `EventSink`.
//!
//! # Example
//!
//! ```rust
//! use reqevents::hooks::{record_event, EventHooks};
//! use reqevents::request::{handle_request, RequestContext, RequestHook};
//! use reqevents::sender::EventSink;
//! use serde_json::{json, Value};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Default)]
//! struct Collected(Mutex<Vec<(String, Value)>>);
//!
//! impl EventSink for Collected {
//!     fn enqueue(&self, collection: String, payload: Value) {
//!         self.0.lock().unwrap().push((collection, payload));
//!     }
//! }
//!
//! let sink = Arc::new(Collected::default());
//! let hooks = EventHooks::new(sink.clone());
//! let pipeline: Vec<&dyn RequestHook> = vec![&hooks];
//!
//! let mut ctx = RequestContext::new();
//! handle_request(&pipeline, &mut ctx, |ctx| {
//!     record_event(ctx, "purchases", json!({"item": "book"}));
//! });
//!
//! assert_eq!(sink.0.lock().unwrap().len(), 1);
//! ```

use crate::config::{AnalyticsConfig, SenderCredentials};
use crate::core::error_handling::log_warning_with_context;
use crate::queue::EventQueue;
use crate::request::{RequestContext, RequestHook, SlotKey};
use crate::sender::{EventSink, SenderResult};
use serde_json::Value;
use std::sync::Arc;

/// Slot holding the request's event queue
pub const EVENT_QUEUE_KEY: SlotKey<Arc<EventQueue>> = SlotKey::new("event_queue");

/// Outcome of draining one request's queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Events handed to the sink
    pub forwarded: usize,
    /// Events dropped for an empty collection or absent payload
    pub dropped: usize,
}

/// Attaches and drains per-request event queues
#[derive(Clone)]
pub struct EventHooks {
    sink: Arc<dyn EventSink>,
}

impl EventHooks {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Build the hooks from configuration, or disable the feature
    ///
    /// Missing credentials or a sink that cannot be started are logged as
    /// warnings and yield `None`; the host keeps running without analytics.
    pub fn from_config<F>(config: &AnalyticsConfig, make_sink: F) -> Option<Self>
    where
        F: FnOnce(&SenderCredentials) -> SenderResult<Arc<dyn EventSink>>,
    {
        let credentials = match config.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                log_warning_with_context(&e, "Analytics disabled");
                return None;
            }
        };

        match make_sink(&credentials) {
            Ok(sink) => {
                log::info!(
                    "Analytics event hooks initialised for project {}",
                    credentials.project_id()
                );
                Some(Self::new(sink))
            }
            Err(e) => {
                log_warning_with_context(&e, "Analytics disabled");
                None
            }
        }
    }

    /// Attach a fresh, empty queue to the request
    pub fn on_request_start(&self, ctx: &mut RequestContext) {
        ctx.insert(&EVENT_QUEUE_KEY, Arc::new(EventQueue::new()));
    }

    /// Forward every buffered event to the sink
    ///
    /// Pops until the queue reports empty, so events pushed by tasks still
    /// running during the drain go out with this request. Malformed events
    /// are dropped without comment. A request without a queue is a no-op.
    pub fn on_request_end(&self, ctx: &RequestContext) -> DrainReport {
        let mut report = DrainReport::default();

        let Some(queue) = ctx.get(&EVENT_QUEUE_KEY) else {
            log::trace!("request {} has no event queue", ctx.request_id());
            return report;
        };

        while let Some(event) = queue.pop() {
            match event.into_deliverable() {
                Some((collection, payload)) => {
                    self.sink.enqueue(collection, payload);
                    report.forwarded += 1;
                }
                None => report.dropped += 1,
            }
        }

        if report.forwarded > 0 || report.dropped > 0 {
            log::debug!(
                "request {}: forwarded {} events, dropped {}",
                ctx.request_id(),
                report.forwarded,
                report.dropped
            );
        }
        report
    }
}

impl RequestHook for EventHooks {
    fn before(&self, ctx: &mut RequestContext) {
        self.on_request_start(ctx);
    }

    fn after(&self, ctx: &mut RequestContext) {
        self.on_request_end(ctx);
    }
}

/// The queue attached to this request, for handing to sub-tasks
pub fn event_queue(ctx: &RequestContext) -> Option<Arc<EventQueue>> {
    ctx.get(&EVENT_QUEUE_KEY).cloned()
}

/// Buffer an event on the request's queue
///
/// Returns `false` when no queue is attached, e.g. because analytics are
/// disabled; the event is then discarded.
pub fn record_event(
    ctx: &RequestContext,
    collection: impl Into<String>,
    payload: impl Into<Option<Value>>,
) -> bool {
    match ctx.get(&EVENT_QUEUE_KEY) {
        Some(queue) => {
            queue.push(collection, payload);
            true
        }
        None => false,
    }
}
