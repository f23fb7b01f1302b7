//! Simulation tests.

/// Program text parsing and file loading.
pub mod loader;
