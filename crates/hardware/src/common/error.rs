//! Fault and Error definitions.
//!
//! This module defines the error handling for the machine and its collaborators. It provides:
//! 1. **Faults:** Run-terminating conditions raised while a machine executes.
//! 2. **Load Errors:** Failures turning program text into memory bytes.
//! 3. **Config Errors:** Failures reading or parsing a JSON configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A run-terminating machine fault.
///
/// Faults are never retried. Once one is raised the machine enters the
/// `Faulted` state, its clock is stopped and no further ticks are dispatched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The fetched opcode has no entry in the dispatch table.
    #[error("invalid instruction {opcode:#010b} at pc {pc}")]
    InvalidInstruction {
        /// The offending opcode byte.
        opcode: u8,
        /// Address the opcode was fetched from.
        pc: usize,
    },

    /// A memory access fell outside `0..256`.
    ///
    /// Raised by `peek`/`poke` and by operand fetches that run past the end of memory.
    #[error("memory address {address} out of bounds")]
    OutOfBounds {
        /// The rejected address.
        address: usize,
    },

    /// A register access fell outside `0..256`.
    #[error("register index {index} out of bounds")]
    RegisterOutOfBounds {
        /// The rejected register index.
        index: usize,
    },

    /// `DIV` was executed with a zero divisor register.
    #[error("divide by zero at pc {pc}")]
    DivideByZero {
        /// Address of the faulting `DIV` instruction.
        pc: usize,
    },

    /// `PRN` could not write to the observation channel.
    #[error("output failed at pc {pc}: {reason}")]
    Output {
        /// Address of the faulting `PRN` instruction.
        pc: usize,
        /// Description of the underlying I/O failure.
        reason: String,
    },
}

/// Failure to turn program text into memory bytes.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("could not read program '{}': {source}", path.display())]
    Io {
        /// Path of the program file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line did not hold a base-2 literal in `0..=255`.
    #[error("line {line}: '{text}' is not an 8-bit binary literal")]
    InvalidLiteral {
        /// One-based line number in the source text.
        line: usize,
        /// The offending text with comments and whitespace removed.
        text: String,
    },

    /// The program holds more bytes than memory can store.
    #[error("program is {len} bytes but memory holds {capacity}")]
    ProgramTooLarge {
        /// Number of bytes the program decoded to.
        len: usize,
        /// Number of bytes available from the load address.
        capacity: usize,
    },
}

/// Failure to read or parse a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config '{}': {source}", path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid configuration JSON.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
