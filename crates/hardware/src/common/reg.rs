//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, which combines the general-purpose
//! registers with the condition flags behind one operand-addressed interface.
//! It provides:
//! 1. **Operand Access:** Reading and writing registers by their 5-bit encoded index.
//! 2. **Reserved Registers:** Named accessors for the stack pointer (index 6) and
//!    the flags register (index 16), so neither is touched by accident.
//! 3. **Observability:** Debugging utilities for dumping register state.

use crate::common::constants::{FLAGS_INDEX, NUM_GPRS, SP_INDEX};
use crate::common::error::RegisterFault;
use crate::core::arch::{Flags, Gpr};

/// Register file holding the sixteen general-purpose registers and the flags.
///
/// Index 16 is the flags register: it can be read as an operand (yielding the
/// packed `EFLAGS` word) but only [`RegisterFile::set_flags`] may change it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
    flags: Flags,
}

impl RegisterFile {
    /// Creates a register file with every register zero except the stack pointer.
    ///
    /// # Arguments
    ///
    /// * `stack_top` - Initial stack pointer, the address one past the top of the stack.
    pub fn new(stack_top: i32) -> Self {
        let mut gpr = Gpr::new();
        gpr.write(SP_INDEX, stack_top);
        Self {
            gpr,
            flags: Flags::default(),
        }
    }

    /// Reads a register named by an instruction operand.
    ///
    /// # Arguments
    ///
    /// * `idx` - Encoded register index (0-16).
    ///
    /// # Errors
    ///
    /// Returns [`RegisterFault::Invalid`] for indices past the flags register.
    pub fn read(&self, idx: u8) -> Result<i32, RegisterFault> {
        match usize::from(idx) {
            i if i < NUM_GPRS => Ok(self.gpr.read(i)),
            FLAGS_INDEX => Ok(self.flags.bits() as i32),
            _ => Err(RegisterFault::Invalid(idx)),
        }
    }

    /// Writes a register named by an instruction operand.
    ///
    /// # Arguments
    ///
    /// * `idx` - Encoded register index (0-15).
    /// * `val` - The 32-bit value to write.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterFault::Reserved`] for the flags register and
    /// [`RegisterFault::Invalid`] for indices past it.
    pub fn write(&mut self, idx: u8, val: i32) -> Result<(), RegisterFault> {
        match usize::from(idx) {
            i if i < NUM_GPRS => {
                self.gpr.write(i, val);
                Ok(())
            }
            FLAGS_INDEX => Err(RegisterFault::Reserved(idx)),
            _ => Err(RegisterFault::Invalid(idx)),
        }
    }

    /// Returns the stack pointer.
    pub const fn sp(&self) -> i32 {
        self.gpr.read(SP_INDEX)
    }

    /// Sets the stack pointer.
    pub const fn set_sp(&mut self, val: i32) {
        self.gpr.write(SP_INDEX, val);
    }

    /// Returns the current condition flags.
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Replaces the condition flags.
    pub const fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    /// Returns the general-purpose registers in index order.
    pub const fn gprs(&self) -> &[i32; NUM_GPRS] {
        self.gpr.as_slice()
    }

    /// Dumps every register and the flags to stderr.
    pub fn dump(&self) {
        self.gpr.dump();
        eprintln!("eflags={:#06x} {}", self.flags.bits(), self.flags);
    }
}
