//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers, flags, and the program counter.
//! 2. **Memory:** Owns the stack region the program pushes, pops, loads, and stores through.
//! 3. **I/O:** Owns the console the `printr` and `readr` instructions talk to.
//! 4. **Accounting:** Collects per-run statistics.

/// Single-instruction execution semantics.
pub mod execution;

/// Stack push/pop helpers shared by `pushl`, `popl`, `call`, and `ret`.
pub mod stack;

use crate::common::RegisterFile;
use crate::common::error::{MemoryFault, RegisterFault, SimError};
use crate::config::{Config, UnknownOpcodePolicy};
use crate::soc::{Console, StackMemory};
use crate::stats::SimStats;

pub use execution::Step;

/// Main CPU structure containing all processor state.
///
/// Generic over the console so hosts and tests can attach any input/output pair.
#[derive(Debug)]
pub struct Cpu<C> {
    /// General-purpose registers and flags.
    pub regs: RegisterFile,
    /// Program Counter (byte address of the current instruction).
    pub pc: u32,
    /// Stack memory region.
    pub memory: StackMemory,
    /// Console used by `printr` and `readr`.
    pub console: C,
    /// Execution statistics.
    pub stats: SimStats,
    /// Stack pointer value at reset; a `ret` executed here halts the machine.
    pub stack_top: i32,
    /// Handling of opcodes outside the instruction table.
    pub unknown_opcode: UnknownOpcodePolicy,
}

impl<C: Console> Cpu<C> {
    /// Creates a CPU in its reset state.
    ///
    /// PC is zero, memory is zeroed, every register is zero except the stack
    /// pointer, which points one past the top of the stack region.
    ///
    /// # Arguments
    ///
    /// * `config` - A validated configuration; the stack size must fit in an `i32`.
    /// * `console` - The console attached to the I/O instructions.
    pub fn new(config: &Config, console: C) -> Self {
        let size = config.memory.stack_size;
        let stack_top = i32::try_from(size).unwrap_or(i32::MAX);
        Self {
            regs: RegisterFile::new(stack_top),
            pc: 0,
            memory: StackMemory::new(size),
            console,
            stats: SimStats::default(),
            stack_top,
            unknown_opcode: config.general.unknown_opcode,
        }
    }

    /// Reads a register operand, attributing faults to the current instruction.
    pub(crate) fn reg(&self, idx: u8) -> Result<i32, SimError> {
        self.regs.read(idx).map_err(|fault| self.register_fault(fault))
    }

    /// Writes a register operand, attributing faults to the current instruction.
    pub(crate) fn set_reg(&mut self, idx: u8, val: i32) -> Result<(), SimError> {
        self.regs
            .write(idx, val)
            .map_err(|fault| self.register_fault(fault))
    }

    /// Reads a memory word, attributing faults to the current instruction.
    pub(crate) fn load(&self, addr: i64) -> Result<i32, SimError> {
        self.memory
            .read_u32(addr)
            .map(|word| word as i32)
            .map_err(|fault| self.memory_fault(fault))
    }

    /// Writes a memory word, attributing faults to the current instruction.
    pub(crate) fn store(&mut self, addr: i64, val: i32) -> Result<(), SimError> {
        self.memory
            .write_u32(addr, val as u32)
            .map_err(|fault| self.memory_fault(fault))
    }

    const fn register_fault(&self, fault: RegisterFault) -> SimError {
        SimError::Register { fault, pc: self.pc }
    }

    const fn memory_fault(&self, fault: MemoryFault) -> SimError {
        SimError::Memory { fault, pc: self.pc }
    }

    /// Dumps the program counter, registers, and flags to stderr.
    pub fn dump_state(&self) {
        eprintln!("--- CPU STATE ---");
        eprintln!("pc={:#06x} stack_top={}", self.pc, self.stack_top);
        self.regs.dump();
        eprintln!("-----------------");
    }
}
