// Copyright (C) 2025 Piers Finlayson <piers@piers.rocks>
//
// MIT License

//! Binary-to-text embedding and title sanitization.
//!
//! ROM images are rendered as C array initializer bodies - comma separated
//! `0xNN` literals, wrapped at 16 bytes per line with a tab-indented
//! continuation so the generated source stays readable.

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Number of byte literals per line in the generated array body
pub const BYTES_PER_LINE: usize = 16;

/// How titles are made safe for a double-quoted C string literal.
///
/// Backslashes are always removed.  The two policies differ only in what
/// happens to a double quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SanitizePolicy {
    /// Drop double quotes entirely
    #[default]
    Strip,
    /// Replace each double quote with an underscore
    Underscore,
}

/// Reads a ROM file and returns its content as a C array initializer body.
///
/// The whole file is read eagerly; a missing or unreadable file is fatal.
pub fn encode_rom(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|source| Error::RomRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(encode_bytes(&data))
}

/// Renders bytes as comma separated uppercase hex literals.
///
/// Chunks of at most [`BYTES_PER_LINE`] bytes are joined with `",\n\t"`;
/// bytes within a chunk with `", "`.  Pure and deterministic.
pub fn encode_bytes(data: &[u8]) -> String {
    data.chunks(BYTES_PER_LINE)
        .map(|chunk| {
            chunk
                .iter()
                .map(|b| format!("0x{:02X}", b))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>()
        .join(",\n\t")
}

/// Makes a title safe to embed in a double-quoted string literal.
pub fn sanitize_title(title: &str, policy: SanitizePolicy) -> String {
    title
        .chars()
        .filter_map(|c| match c {
            '\\' => None,
            '"' => match policy {
                SanitizePolicy::Strip => None,
                SanitizePolicy::Underscore => Some('_'),
            },
            _ => Some(c),
        })
        .collect()
}
