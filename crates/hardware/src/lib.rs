//! Interpreter for a small fixed-width, x86-flavored instruction set.
//!
//! This crate reads programs made of 32-bit instruction words and executes them
//! against a simulated machine with the following:
//! 1. **ISA:** A closed table of 22 opcodes, the word layout, decoder, and disassembler.
//! 2. **Core:** Sixteen 32-bit registers, a flags structure, and per-instruction semantics.
//! 3. **Peripherals:** A bounds-checked stack memory region and a line console.
//! 4. **Simulation:** Loader, fetch/execute loop, cancellation, and statistics.
//!
//! # Example
//!
//! ```
//! use mini86_core::{Config, Simulator, StreamConsole};
//! use mini86_core::isa::{Instruction, Opcode};
//! use mini86_core::sim::ExitStatus;
//!
//! let program = vec![
//!     Instruction::new(Opcode::MovlImmReg, 0, 0, 5),
//!     Instruction::new(Opcode::MovlImmReg, 1, 0, 3),
//!     Instruction::new(Opcode::AddlRegReg, 0, 1, 0),
//!     Instruction::new(Opcode::Printr, 1, 0, 0),
//! ];
//! let console = StreamConsole::new(std::io::empty(), Vec::new());
//! let mut sim = Simulator::new(program, &Config::default(), console);
//!
//! assert_eq!(sim.run().unwrap(), ExitStatus::EndOfProgram);
//! assert_eq!(sim.cpu.console.output().as_slice(), b"8 (0x8)\n");
//! ```

/// Common types and constants (register indices, errors, register file).
pub mod common;
/// Run configuration (defaults, enums, JSON loading).
pub mod config;
/// CPU core (architectural state and instruction execution).
pub mod core;
/// Instruction set (opcodes, encoding, decode, disassembly).
pub mod isa;
/// Program loader and simulation loop.
pub mod sim;
/// Stack memory and console.
pub mod soc;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_file`.
pub use crate::config::Config;
/// CPU state; holds registers, memory, console, and stats.
pub use crate::core::Cpu;
/// Top-level simulator (CPU + program); construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Console over arbitrary readers and writers, including process stdio.
pub use crate::soc::StreamConsole;
