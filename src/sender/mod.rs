//! Outbound Sender
//!
//! Receives events drained from finished requests and delivers them in
//! batches, off the request-handling path.
//!
//! ```text
//!  on_request_end ──enqueue──▶ OutboundSender ──mpsc──▶ worker task
//!                                                          │ groups into Batch
//!                                                          ▼
//!                                                   BatchDelivery::deliver
//! ```
//!
//! The request hooks only depend on the `EventSink` trait, so tests and
//! embedders can substitute their own sink. Delivery failures are logged and
//! the batch is discarded.

mod batch;
mod delivery;
mod error;
mod outbound;
mod traits;

pub use batch::Batch;
pub use delivery::JsonLinesDelivery;
pub use error::{SenderError, SenderResult};
pub use outbound::{OutboundSender, SenderOptions, SenderStats};
pub use traits::{BatchDelivery, EventSink};
