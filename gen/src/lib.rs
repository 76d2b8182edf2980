// Copyright (C) 2025 Piers Finlayson <piers@piers.rocks>
//
// MIT License

//! Generates the embedded ROM source file for the octemu pico firmware.
//!
//! Takes CHIP-8 ROM binaries plus per-ROM metadata (from a hand-written
//! config file or from the chip8Archive catalog), normalizes them into
//! template-ready records and renders them through a user-supplied or
//! built-in `rom.c` template.

pub mod encode;
pub mod record;
pub mod render;
pub mod source;

pub use encode::{BYTES_PER_LINE, SanitizePolicy, encode_bytes, encode_rom, sanitize_title};
pub use record::{DEFAULT_TICKRATE, Mode, RomRecord};
pub use render::render;
pub use source::RomSource;

use std::path::PathBuf;

/// Error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read ROM file {path}")]
    RomRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("unsupported config format for {path} - expected .yaml, .yml or .json")]
    UnsupportedConfigFormat { path: PathBuf },

    #[error("ROM '{name}' is missing required field '{field}'")]
    MissingField { name: String, field: &'static str },

    #[error("template rendering failed")]
    Render(#[from] handlebars::RenderError),
}

pub type Result<T> = core::result::Result<T, Error>;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
