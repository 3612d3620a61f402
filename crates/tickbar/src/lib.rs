//! Application logic for the tickbar binary.

pub mod app;
pub mod config;
pub mod errors;
pub mod logging;
pub mod report;
