//! Error definitions.
//!
//! This module defines every failure the interpreter can report. It provides:
//! 1. **Load Errors:** Problems opening, reading, or sizing the program image.
//! 2. **Decode Errors:** Opcode values outside the instruction table.
//! 3. **Faults:** Out-of-range memory accesses and misuse of register indices.
//! 4. **Simulation Errors:** The top-level error returned by the execution loop.
//!
//! All errors are terminal; nothing in the simulator retries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while bringing a program image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("unable to open input file '{}': {source}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file was opened but could not be read completely.
    #[error("unable to read file '{}': {source}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The image length is not a whole number of 4-byte instructions.
    #[error("invalid input file: size {len} is not a multiple of 4")]
    Misaligned {
        /// Length of the image in bytes.
        len: usize,
    },
}

/// Failure to map a decoded instruction onto the opcode table.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The 5-bit opcode field names no known operation.
    #[error("unknown opcode {opcode} at pc {pc:#x}")]
    UnknownOpcode {
        /// Raw opcode field.
        opcode: u8,
        /// Byte address of the offending instruction.
        pc: u32,
    },
}

/// Access outside the simulated stack region.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MemoryFault {
    /// A 4-byte access at `addr` does not fit inside `[0, size)`.
    #[error("memory access at {addr} is outside the {size}-byte stack region")]
    OutOfBounds {
        /// Effective address, which may be negative.
        addr: i64,
        /// Size of the memory region in bytes.
        size: usize,
    },
}

/// Misuse of a register operand.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RegisterFault {
    /// The index is beyond the register file.
    #[error("register index {0} does not exist")]
    Invalid(u8),

    /// The index names a register only the machine itself may write.
    #[error("register index {0} is reserved and cannot be written")]
    Reserved(u8),
}

/// Failure while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("unable to read config '{}': {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The JSON text did not match the configuration schema.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level error returned by the simulation loop.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program image could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An instruction carried an unknown opcode under the strict policy.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A load, store, push, pop, call, or return left the stack region.
    #[error("{fault} (pc {pc:#x})")]
    Memory {
        /// The fault that occurred.
        #[source]
        fault: MemoryFault,
        /// Byte address of the faulting instruction.
        pc: u32,
    },

    /// An instruction named an invalid or reserved register.
    #[error("{fault} (pc {pc:#x})")]
    Register {
        /// The fault that occurred.
        #[source]
        fault: RegisterFault,
        /// Byte address of the faulting instruction.
        pc: u32,
    },

    /// The program counter left the program without landing on its end.
    #[error("program counter {pc:#x} is outside the program ({len} instructions)")]
    PcOutOfRange {
        /// Offending program counter.
        pc: u32,
        /// Number of instructions in the program.
        len: usize,
    },

    /// `readr` could not obtain an integer from the console.
    #[error("input error: {0}")]
    Input(String),

    /// `printr` could not write to the console.
    #[error("output error: {0}")]
    Output(#[source] io::Error),
}
