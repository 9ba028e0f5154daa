//! Configuration system for the interpreter.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline machine constants (stack size, byte order, decode policy).
//! 2. **Structures:** Hierarchical config for general run options and memory.
//! 3. **Enums:** Unknown-opcode policy and program byte order.
//!
//! Configuration is supplied as JSON (`Config::from_file`) or via `Config::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{DEFAULT_STACK_SIZE, WORD_BYTES};
use crate::common::error::ConfigError;

/// What the executor does with an opcode value outside the instruction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum UnknownOpcodePolicy {
    /// Stop the run with a decode error.
    #[default]
    Strict,
    /// Treat the instruction as a no-op and continue at the next instruction.
    Lenient,
}

/// Byte order of instruction words in the program image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ByteOrder {
    /// Whatever the host uses; matches images written by a same-host assembler.
    #[default]
    Native,
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl ByteOrder {
    /// Assembles one instruction word from four image bytes.
    pub const fn word(self, bytes: [u8; WORD_BYTES]) -> u32 {
        match self {
            Self::Native => u32::from_ne_bytes(bytes),
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use mini86_core::config::{ByteOrder, Config, UnknownOpcodePolicy};
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "unknown_opcode": "Lenient" },
///     "memory": { "stack_size": 4096, "byte_order": "Big" }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.unknown_opcode, UnknownOpcodePolicy::Lenient);
/// assert_eq!(config.memory.stack_size, 4096);
/// assert_eq!(config.memory.byte_order, ByteOrder::Big);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General run settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Stack memory and program image settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    ///
    /// Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the stack size is zero, not a
    /// multiple of the word size, or too large for a 32-bit stack pointer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.memory.stack_size;
        if size == 0 || size % WORD_BYTES != 0 {
            return Err(ConfigError::Invalid(format!(
                "stack_size {size} must be a positive multiple of {WORD_BYTES}"
            )));
        }
        if i32::try_from(size).is_err() {
            return Err(ConfigError::Invalid(format!(
                "stack_size {size} does not fit a 32-bit stack pointer"
            )));
        }
        Ok(())
    }
}

/// General run settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace`-level event for every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Stop after this many instructions; `None` runs until the program ends.
    #[serde(default)]
    pub max_instructions: Option<u64>,

    /// Handling of opcodes outside the instruction table.
    #[serde(default)]
    pub unknown_opcode: UnknownOpcodePolicy,
}

/// Stack memory and program image settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Size of the stack region in bytes; also the initial stack pointer.
    #[serde(default = "MemoryConfig::default_stack_size")]
    pub stack_size: usize,

    /// Byte order of instruction words in the program file.
    #[serde(default)]
    pub byte_order: ByteOrder,
}

impl MemoryConfig {
    /// Returns the default stack size.
    const fn default_stack_size() -> usize {
        DEFAULT_STACK_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            stack_size: Self::default_stack_size(),
            byte_order: ByteOrder::default(),
        }
    }
}
