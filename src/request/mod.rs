//! Request-scoped storage and the hook boundary of the request pipeline
//!
//! `RequestContext` is the per-request key-value store the event hooks attach
//! their queue to. `RequestHook` and `handle_request` model the "before" and
//! "after" callbacks a surrounding request-processing framework invokes.

mod context;
mod hook;

pub use context::{RequestContext, SlotKey};
pub use hook::{handle_request, RequestHook};
