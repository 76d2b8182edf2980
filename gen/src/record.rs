// Copyright (C) 2025 Piers Finlayson <piers@piers.rocks>
//
// MIT License

//! The normalized ROM record handed to the template renderer.

use serde::{Deserialize, Serialize};

/// Tickrate applied when the explicit config omits one
pub const DEFAULT_TICKRATE: u32 = 100;

/// Interpreter dialect a ROM expects at runtime
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Chip8,
    Schip,
    #[default]
    Octo,
}

/// One ROM, normalized and ready for rendering.
///
/// Immutable once constructed.  The renderer sees the fields under their
/// serialized names: `title`, `mode`, `tickrate`, `data`.
#[derive(Debug, Clone, Serialize)]
pub struct RomRecord {
    /// Title, already sanitized for a double-quoted string literal
    pub title: String,

    /// Interpreter dialect
    pub mode: Mode,

    /// Emulated execution steps per display frame
    pub tickrate: u32,

    /// C array initializer body for the ROM bytes
    pub data: String,
}
