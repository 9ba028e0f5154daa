//! Global Machine Constants.
//!
//! This module defines the fixed parameters of the simulated machine. It includes:
//! 1. **Register Constants:** Register count and the reserved stack-pointer and flags indices.
//! 2. **Memory Constants:** Default stack size and word width.
//! 3. **Instruction Constants:** Field positions and masks of the 32-bit encoding.
//! 4. **Flag Constants:** Bit positions of the condition codes in the packed flags word.

/// Number of architectural registers (16 general purpose plus the flags register).
pub const NUM_REGS: usize = 17;

/// Number of registers an instruction may name as a general-purpose operand.
pub const NUM_GPRS: usize = 16;

/// Register index reserved as the stack pointer (`%esp`).
pub const SP_INDEX: usize = 6;

/// Register index reserved for the packed condition flags (`%eflags`).
pub const FLAGS_INDEX: usize = 16;

/// Default size of the stack region in bytes.
pub const DEFAULT_STACK_SIZE: usize = 1024;

/// Width of a machine word and of one encoded instruction, in bytes.
pub const WORD_BYTES: usize = 4;

/// Bit position of the opcode field (bits 31-27).
pub const OPCODE_SHIFT: u32 = 27;

/// Bit position of the first register field (bits 26-22).
pub const REG1_SHIFT: u32 = 22;

/// Bit position of the second register field (bits 21-17).
pub const REG2_SHIFT: u32 = 17;

/// Mask for every 5-bit field (opcode and both register indices).
pub const FIELD_MASK: u32 = 0x1F;

/// Mask for the 16-bit immediate field (bits 15-0).
pub const IMM_MASK: u32 = 0xFFFF;

/// Carry flag bit position.
pub const CF_BIT: u32 = 0;

/// Zero flag bit position.
pub const ZF_BIT: u32 = 6;

/// Sign flag bit position.
pub const SF_BIT: u32 = 7;

/// Overflow flag bit position.
pub const OF_BIT: u32 = 11;
