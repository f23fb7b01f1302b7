//! LS-8 Opcodes.
//!
//! One byte selects the instruction; up to two operand bytes follow it.

/// Stop the clock (HALT).
pub const HALT: u8 = 0b0000_0000;

/// Reset the current-register pointer to R0 (INIT).
pub const INIT: u8 = 0b0000_0001;

/// Select the current register (SET reg).
pub const SET: u8 = 0b0000_0010;

/// Store a literal in the current register (SAVE value).
pub const SAVE: u8 = 0b0000_0100;

/// Multiply two registers into the current register (MUL a, b).
pub const MUL: u8 = 0b0000_0101;

/// Print the current register (PRN).
pub const PRN: u8 = 0b0000_0110;

/// Subtract two registers into the current register (SUB a, b).
pub const SUB: u8 = 0b0000_0111;

/// Add two registers into the current register (ADD a, b).
pub const ADD: u8 = 0b0000_1000;

/// Divide two registers into the current register (DIV a, b).
pub const DIV: u8 = 0b0000_1001;
