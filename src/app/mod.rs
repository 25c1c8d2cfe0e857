//! Application module: command line, request replay and startup

pub mod cli;
pub mod replay;
pub mod startup;
