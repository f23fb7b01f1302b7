//! Global Machine Constants.
//!
//! This module defines machine-wide constants used across the simulator. It includes:
//! 1. **Address Space:** Memory size and the address programs are loaded at.
//! 2. **Register File:** Number of general-purpose register cells.
//! 3. **Clock:** Default period of the tick loop.

/// Number of addressable memory cells (addresses `0..=255`).
pub const MEMORY_SIZE: usize = 256;

/// Number of general-purpose register cells (indices `0..=255`).
pub const REGISTER_COUNT: usize = 256;

/// Address the loader writes the first program byte to.
pub const PROGRAM_START: usize = 0;

/// Default clock period in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Radix of program literals.
pub const PROGRAM_RADIX: u32 = 2;

/// Character that starts a comment in program text.
pub const COMMENT_MARKER: char = '#';
