//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode table, the 32-bit instruction layout, the decoder, and
//! a disassembler for diagnostics.

/// Instruction decoding from raw words.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// The closed opcode enumeration.
pub mod opcode;

pub use decode::{decode, decode_program};
pub use instruction::{Instruction, encode};
pub use opcode::Opcode;
