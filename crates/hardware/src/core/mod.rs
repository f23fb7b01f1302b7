//! Machine core.
//!
//! This module contains the machine and the components it owns: memory,
//! the register file, the clock that drives the tick loop, and the console
//! that receives printed values.

/// Fixed-period clock and its cross-thread stop handle.
pub mod clock;

/// Observation channel for `PRN`.
pub mod console;

/// Machine state, lifecycle and the fetch-dispatch-execute loop.
pub mod machine;

/// Byte-addressable main memory.
pub mod memory;

/// General-purpose register file.
pub mod registers;

pub use self::machine::{Machine, MachineState};
