//! Byte-Addressable Main Memory.
//!
//! This module implements the machine's 256-byte memory. It performs the following:
//! 1. **Storage:** Holds `MEMORY_SIZE` zero-initialised byte cells.
//! 2. **Bounds Enforcement:** Rejects every access outside `0..MEMORY_SIZE` with a fault.
//! 3. **Loading:** Copies program images into memory in one step.

use crate::common::{Fault, MEMORY_SIZE};

/// Fixed-size main memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Creates a memory with every cell set to zero.
    pub const fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Reads the byte at `address`.
    ///
    /// # Returns
    ///
    /// The stored byte, or `Fault::OutOfBounds` if `address >= MEMORY_SIZE`.
    #[inline]
    pub fn read(&self, address: usize) -> Result<u8, Fault> {
        self.cells
            .get(address)
            .copied()
            .ok_or(Fault::OutOfBounds { address })
    }

    /// Writes `value` to `address`.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or `Fault::OutOfBounds` if `address >= MEMORY_SIZE`.
    #[inline]
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), Fault> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(Fault::OutOfBounds { address })?;
        *cell = value;
        Ok(())
    }

    /// Copies `bytes` into memory starting at `offset`.
    ///
    /// Nothing is written unless the whole image fits.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or `Fault::OutOfBounds` naming the first address past the end of memory.
    pub fn load(&mut self, offset: usize, bytes: &[u8]) -> Result<(), Fault> {
        let out_of_bounds = Fault::OutOfBounds {
            address: offset.max(MEMORY_SIZE),
        };
        let end = offset
            .checked_add(bytes.len())
            .ok_or_else(|| out_of_bounds.clone())?;
        let region = self.cells.get_mut(offset..end).ok_or(out_of_bounds)?;
        region.copy_from_slice(bytes);
        Ok(())
    }

    /// Returns the whole memory image.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
