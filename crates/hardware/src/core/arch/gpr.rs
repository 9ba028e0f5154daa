//! General-Purpose Register File.
//!
//! This module implements the sixteen 32-bit general-purpose registers. It performs the following:
//! 1. **Storage:** Maintains registers `0`-`15` as signed 32-bit values.
//! 2. **Naming:** Maps indices to the x86-style names used in disassembly and dumps.
//! 3. **Debugging:** Provides utilities for dumping the complete register state.

use crate::common::constants::NUM_GPRS;

/// Display names for the general-purpose registers, indexed by register number.
///
/// Indices 0-7 follow the x86 encoding order; index 6 is the stack pointer.
pub const GPR_NAMES: [&str; NUM_GPRS] = [
    "eax", "ecx", "edx", "ebx", "esi", "edi", "esp", "ebp", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15",
];

/// General-Purpose Register file.
///
/// Contains sixteen signed 32-bit registers. The caller is responsible for
/// keeping indices below [`NUM_GPRS`]; the unified register file enforces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; NUM_GPRS],
}

impl Gpr {
    /// Creates a new register file with every register set to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_GPRS],
        }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    pub const fn read(&self, idx: usize) -> i32 {
        self.regs[idx]
    }

    /// Writes a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    /// * `val` - The 32-bit value to write.
    pub const fn write(&mut self, idx: usize, val: i32) {
        self.regs[idx] = val;
    }

    /// Returns all register values in index order.
    pub const fn as_slice(&self) -> &[i32; NUM_GPRS] {
        &self.regs
    }

    /// Dumps the contents of all registers to stderr.
    ///
    /// Displays registers in pairs with decimal and hexadecimal formatting.
    pub fn dump(&self) {
        for i in (0..NUM_GPRS).step_by(2) {
            eprintln!(
                "{:<4}={:>11} ({:#010x})  {:<4}={:>11} ({:#010x})",
                GPR_NAMES[i],
                self.regs[i],
                self.regs[i] as u32,
                GPR_NAMES[i + 1],
                self.regs[i + 1],
                self.regs[i + 1] as u32
            );
        }
    }
}
