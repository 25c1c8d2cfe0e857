//! Per-request analytics event buffering
//!
//! Request hooks attach an [`queue::EventQueue`] to every request; handlers
//! record events into it, and when the request ends the buffered events are
//! forwarded to a background [`sender::OutboundSender`] that delivers them in
//! batches.

pub mod app;
pub mod config;
pub mod core;
pub mod hooks;
pub mod queue;
pub mod request;
pub mod sender;
