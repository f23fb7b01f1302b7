//! General-Purpose Register File.
//!
//! This module implements the 256-cell register file. It performs the following:
//! 1. **Storage:** Maintains `REGISTER_COUNT` 64-bit floating-point registers, all starting at zero.
//! 2. **Indexing:** Instruction operands are single bytes, so internal accesses cannot miss;
//!    the public `get` accessor takes a wider index and is bounds-checked.
//! 3. **Debugging:** Provides utilities for dumping the register state.

use crate::common::{Fault, REGISTER_COUNT};
use crate::core::console::format_value;

/// General-purpose register file.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisterFile {
    regs: [f64; REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0.0; REGISTER_COUNT],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-255).
    #[inline]
    pub const fn read(&self, idx: u8) -> f64 {
        self.regs[idx as usize]
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-255).
    /// * `val` - The value to store.
    #[inline]
    pub const fn write(&mut self, idx: u8, val: f64) {
        self.regs[idx as usize] = val;
    }

    /// Reads a register by an unchecked index.
    ///
    /// # Returns
    ///
    /// The register value, or `Fault::RegisterOutOfBounds` if `idx >= REGISTER_COUNT`.
    pub fn get(&self, idx: usize) -> Result<f64, Fault> {
        self.regs
            .get(idx)
            .copied()
            .ok_or(Fault::RegisterOutOfBounds { index: idx })
    }

    /// Sets every register back to zero.
    pub const fn reset(&mut self) {
        self.regs = [0.0; REGISTER_COUNT];
    }

    /// Returns all register values in index order.
    pub fn as_slice(&self) -> &[f64] {
        &self.regs
    }

    /// Dumps every non-zero register to stderr.
    pub fn dump(&self) {
        let mut any = false;
        for (idx, val) in self.regs.iter().enumerate().filter(|(_, v)| **v != 0.0) {
            eprintln!("R{idx:<3} = {}", format_value(*val));
            any = true;
        }
        if !any {
            eprintln!("(all registers zero)");
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
