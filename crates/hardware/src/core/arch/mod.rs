//! Architectural machine state.
//!
//! This module contains the programmer-visible state elements of the machine.
//! It includes the following modules:
//! 1. **Flags:** The condition-code structure produced by `cmpl`.
//! 2. **GPRs:** The sixteen general-purpose registers.

/// Condition flags (CF, ZF, SF, OF) and the comparison that produces them.
pub mod flags;

/// General-Purpose Register file implementation.
pub mod gpr;

pub use flags::Flags;
pub use gpr::Gpr;
