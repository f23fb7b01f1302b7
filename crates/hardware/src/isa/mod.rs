//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode encodings, the dispatch table, the decoded
//! instruction type with its execution semantics, and the disassembler.

/// Instruction disassembler for tracing and diagnostics.
pub mod disasm;

/// Opcodes, dispatch table, decoding and execution.
pub mod instruction;

/// Opcode byte constants.
pub mod opcodes;

pub use instruction::{DispatchTable, Instruction, Opcode};
