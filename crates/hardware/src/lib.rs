//! LS-8 virtual machine library.
//!
//! This crate implements a small clock-driven machine with a 256-byte memory
//! and 256 registers:
//! 1. **Core:** Machine state, the fetch-dispatch-execute tick, the clock and the console.
//! 2. **ISA:** Opcodes, the dispatch table, decoding, execution and disassembly.
//! 3. **Simulation:** Program loader and the clock-driven simulator.
//! 4. **Support:** Configuration, faults and run statistics.
//!
//! # Example
//!
//! ```
//! use ls8_core::config::Config;
//! use ls8_core::core::console::SharedBuffer;
//! use ls8_core::core::{Machine, MachineState};
//!
//! let out = SharedBuffer::new();
//! let mut machine = Machine::with_console(&Config::default(), Box::new(out.clone()));
//! // INIT; SET R0; SAVE 8; PRN; HALT
//! machine.load_program(&[0b0001, 0b0010, 0, 0b0100, 0b1000, 0b0110, 0b0000]).unwrap();
//!
//! assert_eq!(machine.run_until(100).unwrap(), MachineState::Halted);
//! assert_eq!(out.values(), vec![8.0]);
//! ```

/// Common constants and error types.
pub mod common;
/// Machine configuration (defaults and JSON loading).
pub mod config;
/// Machine, memory, registers, clock and console.
pub mod core;
/// Instruction set (opcodes, dispatch, decode, execute, disassembly).
pub mod isa;
/// Program loader and simulator.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Run-terminating machine fault.
pub use crate::common::Fault;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main machine type; owns memory, registers, clock and console.
pub use crate::core::{Machine, MachineState};
/// Loads a program and runs it on the clock.
pub use crate::sim::Simulator;
