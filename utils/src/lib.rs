//! Shared utilities for the solvault wallet service.

pub mod logging;

pub use logging::init_tracing;
