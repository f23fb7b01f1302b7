//! Program Loader.
//!
//! This module turns program text into a memory image. It performs:
//! 1. **Comment stripping:** Everything from `#` to the end of a line is dropped.
//! 2. **Literal parsing:** Each remaining non-blank line is one base-2 byte (`0..=255`).
//! 3. **Capacity check:** Programs longer than memory are rejected before anything is written.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::LoadError;
use crate::common::constants::{COMMENT_MARKER, MEMORY_SIZE, PROGRAM_RADIX, PROGRAM_START};

/// Parses program text into bytes, in load order.
///
/// # Arguments
///
/// * `text` - Newline-separated program source.
///
/// # Returns
///
/// The program bytes, or the first `LoadError` found.
pub fn parse_program(text: &str) -> Result<Vec<u8>, LoadError> {
    let mut bytes = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let code = raw
            .split_once(COMMENT_MARKER)
            .map_or(raw, |(code, _)| code)
            .trim();
        if code.is_empty() {
            continue;
        }
        let byte = u8::from_str_radix(code, PROGRAM_RADIX).map_err(|_| LoadError::InvalidLiteral {
            line: idx + 1,
            text: code.to_string(),
        })?;
        bytes.push(byte);
    }

    let capacity = MEMORY_SIZE - PROGRAM_START;
    if bytes.len() > capacity {
        return Err(LoadError::ProgramTooLarge {
            len: bytes.len(),
            capacity,
        });
    }
    Ok(bytes)
}

/// Reads and parses a program file.
///
/// # Arguments
///
/// * `path` - Path to the program source.
///
/// # Returns
///
/// The program bytes, or a `LoadError` if the file cannot be read or parsed.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bytes = parse_program(&text)?;
    debug!(path = %path.display(), len = bytes.len(), "program parsed");
    Ok(bytes)
}
