//! Core processor implementation.
//!
//! This module contains the CPU state, the architectural register and flag
//! definitions, and the semantics of every instruction.

/// Architecture-specific components (flags, general-purpose registers).
pub mod arch;

/// CPU core state and instruction execution.
pub mod cpu;

pub use cpu::{Cpu, Step};
