//! # Unit Components
//!
//! Tests for each component of the interpreter, from the instruction layout up
//! to whole-program runs.


/// Configuration parsing, defaults, and validation.
pub mod config;

/// Flags, instruction semantics, control flow, the stack, and console I/O.
pub mod core;

/// Opcode table, decoding, and disassembly.
pub mod isa;


/// Stack memory and the stream console.
pub mod soc;
