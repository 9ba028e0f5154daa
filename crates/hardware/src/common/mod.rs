//! Common utilities and types used throughout the interpreter.
//!
//! This module provides fundamental building blocks shared across all components.
//! It includes:
//! 1. **Constants:** Register indices, encoding field positions, flag bits, and sizes.
//! 2. **Error Handling:** Load, decode, memory, register, and simulation errors.
//! 3. **Register Management:** A typed register file with reserved-register accessors.

/// Common constants used throughout the interpreter.
pub mod constants;

/// Error types for loading, decoding, and execution.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{DEFAULT_STACK_SIZE, FLAGS_INDEX, NUM_REGS, SP_INDEX, WORD_BYTES};
pub use error::{ConfigError, DecodeError, LoadError, MemoryFault, RegisterFault, SimError};
pub use reg::RegisterFile;
