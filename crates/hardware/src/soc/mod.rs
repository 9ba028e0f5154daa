//! Machine peripherals.
//!
//! This module organizes the components the processor talks to: the stack
//! memory region and the console used by the I/O instructions.

/// Console device behind `printr` and `readr`.
pub mod console;

/// Bounds-checked stack memory.
pub mod memory;

pub use console::{Console, StreamConsole};
pub use memory::StackMemory;
