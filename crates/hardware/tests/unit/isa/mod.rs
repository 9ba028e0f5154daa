//! # ISA Unit Tests
//!
//! Instruction field extraction, the opcode table, and disassembly.
