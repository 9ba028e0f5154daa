//! # Core Unit Tests
//!
//! Instruction semantics exercised through the simulator harness.

/// Conditional branches, `jmp`, `call`, and `ret`.
pub mod control_flow;
