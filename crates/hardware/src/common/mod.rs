//! Common utilities and types used throughout the machine.
//!
//! This module provides building blocks shared by every component:
//! 1. **Constants:** Memory size, register count and clock defaults.
//! 2. **Error Handling:** Machine faults, loader and configuration errors.

/// Common constants used throughout the machine.
pub mod constants;

/// Fault and error definitions.
pub mod error;

pub use constants::{MEMORY_SIZE, REGISTER_COUNT};
pub use error::{ConfigError, Fault, LoadError};
