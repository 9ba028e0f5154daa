//! Instruction Decoder.
//!
//! This module turns raw 32-bit words into [`Instruction`] values. Decoding is
//! pure and total: every bit pattern yields an instruction, and whether its
//! opcode is executable is decided later by the executor.

use crate::isa::instruction::{Instruction, InstructionBits};

/// Decodes one instruction word into its component fields.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction encoding to decode.
///
/// # Returns
///
/// An `Instruction` with the opcode, both register fields, and the
/// sign-extended immediate.
pub fn decode(word: u32) -> Instruction {
    Instruction {
        raw: word,
        opcode: word.opcode(),
        first_register: word.reg1(),
        second_register: word.reg2(),
        immediate: word.imm(),
    }
}

/// Decodes a whole program image, preserving instruction order.
pub fn decode_program(words: &[u32]) -> Vec<Instruction> {
    words.iter().copied().map(decode).collect()
}
