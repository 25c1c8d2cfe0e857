//! OutboundSender - background batching of forwarded events
//!
//! Events enter through a non-blocking `enqueue` and travel over an unbounded
//! channel to a worker task. The worker groups whatever is already waiting
//! into a `Batch` and awaits its `BatchDelivery` before taking the next one.

use crate::config::SenderCredentials;
use crate::sender::batch::Batch;
use crate::sender::error::{SenderError, SenderResult};
use crate::sender::traits::{BatchDelivery, EventSink};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Tuning for the background worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderOptions {
    /// Upper bound on events per delivered batch (zero behaves as one)
    pub max_batch_size: usize,
}

impl Default for SenderOptions {
    fn default() -> Self {
        Self {
            max_batch_size: 100,
        }
    }
}

/// Delivery counters reported when the sender shuts down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderStats {
    pub events_delivered: usize,
    pub batches_delivered: usize,
    pub events_failed: usize,
    pub batches_failed: usize,
}

type Envelope = (String, Value);

/// Asynchronous sender fed by the request hooks
///
/// Share it as `Arc<OutboundSender>`; the same handle is used to enqueue from
/// request code and to shut the worker down at process exit.
///
/// # Example
///
/// ```rust,no_run
/// use reqevents::config::SenderCredentials;
/// use reqevents::sender::{EventSink, JsonLinesDelivery, OutboundSender, SenderOptions};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = SenderCredentials::new("my-project", "my-write-key")?;
/// let delivery = Arc::new(JsonLinesDelivery::new(tokio::io::stdout()));
/// let sender = OutboundSender::spawn(&credentials, delivery, SenderOptions::default())?;
///
/// sender.enqueue("purchases".to_string(), json!({"item": "book"}));
///
/// let stats = sender.shutdown().await;
/// println!("delivered {} events", stats.events_delivered);
/// # Ok(())
/// # }
/// ```
pub struct OutboundSender {
    tx: Mutex<Option<mpsc::UnboundedSender<Envelope>>>,
    worker: Mutex<Option<JoinHandle<SenderStats>>>,
}

impl OutboundSender {
    /// Start the worker on the current tokio runtime
    pub fn spawn(
        credentials: &SenderCredentials,
        delivery: Arc<dyn BatchDelivery>,
        options: SenderOptions,
    ) -> SenderResult<Self> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SenderError::NoRuntime)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let project_id = credentials.project_id().to_string();
        let max_batch_size = options.max_batch_size.max(1);

        let worker = runtime.spawn(run_worker(project_id, rx, delivery, max_batch_size));
        log::debug!(
            "Outbound sender started for project {} (max batch size {})",
            credentials.project_id(),
            max_batch_size
        );

        Ok(Self {
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Queue one event for delivery without waiting
    pub fn try_enqueue(&self, collection: String, payload: Value) -> SenderResult<()> {
        let tx = self.tx.lock().unwrap_or_else(PoisonError::into_inner);
        match tx.as_ref() {
            Some(tx) => tx
                .send((collection, payload))
                .map_err(|_| SenderError::Closed),
            None => Err(SenderError::Closed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(true, |tx| tx.is_closed())
    }

    /// Stop accepting events and wait until everything already queued is delivered
    ///
    /// Calling it again returns empty stats.
    pub async fn shutdown(&self) -> SenderStats {
        // Dropping the only sender ends the worker's receive loop once drained
        drop(self.tx.lock().unwrap_or_else(PoisonError::into_inner).take());

        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(worker) = worker else {
            return SenderStats::default();
        };

        match worker.await {
            Ok(stats) => {
                log::debug!(
                    "Outbound sender stopped: {} events in {} batches delivered, {} events failed",
                    stats.events_delivered,
                    stats.batches_delivered,
                    stats.events_failed
                );
                stats
            }
            Err(e) => {
                log::error!("Outbound sender worker terminated abnormally: {}", e);
                SenderStats::default()
            }
        }
    }
}

impl EventSink for OutboundSender {
    fn enqueue(&self, collection: String, payload: Value) {
        if let Err(e) = self.try_enqueue(collection, payload) {
            log::debug!("Dropping event: {}", e);
        }
    }
}

async fn run_worker(
    project_id: String,
    mut rx: mpsc::UnboundedReceiver<Envelope>,
    delivery: Arc<dyn BatchDelivery>,
    max_batch_size: usize,
) -> SenderStats {
    let mut stats = SenderStats::default();

    while let Some((collection, payload)) = rx.recv().await {
        let mut batch = Batch::new(project_id.clone());
        batch.add(collection, payload);

        while batch.len() < max_batch_size {
            match rx.try_recv() {
                Ok((collection, payload)) => batch.add(collection, payload),
                Err(_) => break,
            }
        }

        let count = batch.len();
        match delivery.deliver(&batch).await {
            Ok(()) => {
                stats.events_delivered += count;
                stats.batches_delivered += 1;
                log::trace!("Delivered batch of {} events", count);
            }
            Err(e) => {
                stats.events_failed += count;
                stats.batches_failed += 1;
                log::warn!("Discarding batch of {} events: {}", count, e);
            }
        }
    }

    stats
}
