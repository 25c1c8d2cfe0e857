//! Traits at the seams of the sender
//!
//! `EventSink` is what the request hooks forward drained events into.
//! `BatchDelivery` is what the background worker hands grouped events to.

use crate::sender::batch::Batch;
use crate::sender::error::SenderResult;
use async_trait::async_trait;
use serde_json::Value;

/// Accepts events for asynchronous delivery
///
/// Implementations must not block: `enqueue` is called from request-handling
/// code and the caller never waits for delivery.
pub trait EventSink: Send + Sync {
    fn enqueue(&self, collection: String, payload: Value);
}

/// Backend that transmits one batch of events
#[async_trait]
pub trait BatchDelivery: Send + Sync {
    async fn deliver(&self, batch: &Batch) -> SenderResult<()>;
}
