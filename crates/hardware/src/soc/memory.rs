//! Stack Memory.
//!
//! This module implements the single memory region of the machine: a fixed-size,
//! byte-addressable buffer used as the call and data stack. It provides:
//! 1. **Storage:** An owned, zero-initialized byte buffer.
//! 2. **Word Access:** Bounds-checked 4-byte little-endian reads and writes at any
//!    byte address, aligned or not.
//! 3. **Faults:** Every access outside `[0, size)` is reported as a [`MemoryFault`]
//!    instead of touching memory.

use crate::common::constants::WORD_BYTES;
use crate::common::error::MemoryFault;

/// Byte-addressable stack region.
#[derive(Clone, PartialEq, Eq)]
pub struct StackMemory {
    bytes: Vec<u8>,
}

impl StackMemory {
    /// Creates a zeroed memory region of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the size of the region in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the raw contents of the region.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Resolves a 4-byte access at `addr` to a range within the buffer.
    fn span(&self, addr: i64) -> Result<std::ops::Range<usize>, MemoryFault> {
        let fault = MemoryFault::OutOfBounds {
            addr,
            size: self.size(),
        };
        let start = usize::try_from(addr).map_err(|_| fault)?;
        let end = start.checked_add(WORD_BYTES).ok_or(fault)?;
        if end > self.bytes.len() {
            return Err(fault);
        }
        Ok(start..end)
    }

    /// Reads a little-endian word.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address of the first byte; need not be word aligned.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryFault::OutOfBounds`] if any of the four bytes lies outside the region.
    pub fn read_u32(&self, addr: i64) -> Result<u32, MemoryFault> {
        let span = self.span(addr)?;
        let mut word = [0u8; WORD_BYTES];
        word.copy_from_slice(&self.bytes[span]);
        Ok(u32::from_le_bytes(word))
    }

    /// Writes a little-endian word.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address of the first byte; need not be word aligned.
    /// * `val` - The value to store.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryFault::OutOfBounds`] if any of the four bytes lies outside the region.
    pub fn write_u32(&mut self, addr: i64, val: u32) -> Result<(), MemoryFault> {
        let span = self.span(addr)?;
        self.bytes[span].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }
}

impl std::fmt::Debug for StackMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackMemory")
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}
