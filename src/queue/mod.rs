//! Per-Request Event Queue
//!
//! Buffers analytics events produced while a request is being handled. Each
//! in-flight request owns exactly one `EventQueue`; it is created empty when
//! the request starts, filled by application code, and drained once when the
//! request ends.
//!
//! # Overview
//!
//! - **Strict FIFO**: events come out in the order they were pushed
//! - **Concurrent producers**: tasks of the same request can push through a
//!   shared `Arc<EventQueue>`
//! - **Non-failing pop**: an empty queue yields `None`, never an error
//! - **No validation**: empty collections and absent payloads are stored as-is
//!   and filtered by the drain step
//!
//! ```text
//!  handler task A ──push──┐
//!  handler task B ──push──┼──▶ ┌───┬───┬───┬───┐ ──pop──▶ on_request_end ──▶ EventSink
//!  handler task C ──push──┘    │ 1 │ 2 │ 3 │...│
//!                              └───┴───┴───┴───┘
//! ```

mod event;
mod event_queue;

pub use event::Event;
pub use event_queue::EventQueue;

#[cfg(test)]
mod tests;
