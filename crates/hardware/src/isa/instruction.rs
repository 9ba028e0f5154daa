//! Instruction encoding and field extraction.
//!
//! Every instruction is one 32-bit word with the layout:
//!
//! ```text
//!  31    27 26    22 21    17 16 15             0
//! +--------+--------+--------+--+----------------+
//! | opcode |  reg1  |  reg2  |  |   immediate    |
//! +--------+--------+--------+--+----------------+
//! ```
//!
//! Bit 16 is unused. The immediate is a 16-bit two's-complement value.

use crate::common::constants::{FIELD_MASK, IMM_MASK, OPCODE_SHIFT, REG1_SHIFT, REG2_SHIFT};
use crate::isa::opcode::Opcode;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 27-31).
    fn opcode(&self) -> u8;

    /// Extracts the first register field (bits 22-26).
    fn reg1(&self) -> u8;

    /// Extracts the second register field (bits 17-21).
    fn reg2(&self) -> u8;

    /// Extracts the immediate field (bits 0-15), sign-extended to 32 bits.
    fn imm(&self) -> i32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u8 {
        ((self >> OPCODE_SHIFT) & FIELD_MASK) as u8
    }

    #[inline(always)]
    fn reg1(&self) -> u8 {
        ((self >> REG1_SHIFT) & FIELD_MASK) as u8
    }

    #[inline(always)]
    fn reg2(&self) -> u8 {
        ((self >> REG2_SHIFT) & FIELD_MASK) as u8
    }

    /// Truncates to 16 bits, reinterprets as signed, then widens.
    #[inline(always)]
    fn imm(&self) -> i32 {
        i32::from((self & IMM_MASK) as u16 as i16)
    }
}

/// Decoded instruction.
///
/// The opcode is kept as the raw 5-bit field so that decoding never fails;
/// [`Instruction::operation`] maps it onto the opcode table at execution time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Opcode field.
    pub opcode: u8,
    /// First register operand index.
    pub first_register: u8,
    /// Second register operand index.
    pub second_register: u8,
    /// Sign-extended immediate value.
    pub immediate: i32,
}

impl Instruction {
    /// Builds an instruction from its fields, computing the raw encoding.
    ///
    /// Register indices are truncated to 5 bits.
    pub fn new(op: Opcode, first_register: u8, second_register: u8, immediate: i16) -> Self {
        let raw = encode(u8::from(op), first_register, second_register, immediate);
        Self {
            raw,
            opcode: raw.opcode(),
            first_register: raw.reg1(),
            second_register: raw.reg2(),
            immediate: i32::from(immediate),
        }
    }

    /// Maps the opcode field onto the opcode table.
    ///
    /// # Errors
    ///
    /// Returns the raw opcode value when it is unassigned.
    pub fn operation(&self) -> Result<Opcode, u8> {
        Opcode::try_from(self.opcode)
    }
}

/// Packs instruction fields into a 32-bit word.
///
/// Values wider than their fields are truncated; bit 16 is always clear.
pub fn encode(opcode: u8, reg1: u8, reg2: u8, imm: i16) -> u32 {
    (u32::from(opcode) & FIELD_MASK) << OPCODE_SHIFT
        | (u32::from(reg1) & FIELD_MASK) << REG1_SHIFT
        | (u32::from(reg2) & FIELD_MASK) << REG2_SHIFT
        | (u32::from(imm as u16) & IMM_MASK)
}
