//! Simulation utilities and program loading.
//!
//! Provides the loader that turns program text into a memory image and the
//! simulator that wires configuration, loading and the clock-driven run together.

pub mod loader;
pub mod simulator;

pub use simulator::{RunSummary, Simulator};
