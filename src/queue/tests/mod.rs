//! Test modules for the event queue
//!
//! Tests are organized by functional area.
