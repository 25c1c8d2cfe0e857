//! Pipeline integration test modules

pub mod configuration;
pub mod delivery;
pub mod replay;
