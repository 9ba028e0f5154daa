//! Program Loader.
//!
//! This module brings a program image from disk into instruction words. It performs:
//! 1. **Binary loading:** Reads the whole file into a byte buffer.
//! 2. **Validation:** Rejects images whose length is not a whole number of instructions.
//! 3. **Word assembly:** Groups bytes into 32-bit words in the configured byte order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::common::constants::WORD_BYTES;
use crate::common::error::LoadError;
use crate::config::ByteOrder;

/// Loads a binary file from disk into a byte vector.
///
/// # Errors
///
/// Returns [`LoadError::Open`] if the file cannot be opened and
/// [`LoadError::Read`] if reading it fails part way.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut bytes = Vec::new();
    let _ = file
        .read_to_end(&mut bytes)
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(bytes)
}

/// Splits a program image into instruction words.
///
/// # Errors
///
/// Returns [`LoadError::Misaligned`] if the length is not a multiple of 4.
pub fn words_from_bytes(bytes: &[u8], order: ByteOrder) -> Result<Vec<u32>, LoadError> {
    if bytes.len() % WORD_BYTES != 0 {
        return Err(LoadError::Misaligned { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(WORD_BYTES)
        .map(|chunk| order.word([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Loads a program file as a sequence of instruction words.
///
/// # Errors
///
/// Returns any error from [`load_binary`] or [`words_from_bytes`].
pub fn load_program(path: impl AsRef<Path>, order: ByteOrder) -> Result<Vec<u32>, LoadError> {
    let path = path.as_ref();
    let bytes = load_binary(path)?;
    let words = words_from_bytes(&bytes, order)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        instructions = words.len(),
        "program loaded"
    );
    Ok(words)
}
