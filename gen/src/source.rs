// Copyright (C) 2025 Piers Finlayson <piers@piers.rocks>
//
// MIT License

//! Metadata sources and normalization.
//!
//! Two sources produce the same shape - a list of [`RomRecord`]s:
//!
//! - [`RomSource::Explicit`] - a hand-written YAML or JSON config mapping
//!   arbitrary keys to ROM entries.
//! - [`RomSource::Archive`] - the chip8Archive catalog (`programs.json`
//!   plus `roms/<id>.ch8`), filtered to the legacy platforms octemu can
//!   run, with the display mode inferred from quirk flags.

use std::fs;
use std::path::{Path, PathBuf};

#[allow(unused_imports)]
use log::{debug, info, warn};
use serde::Deserialize;

use crate::encode::{SanitizePolicy, encode_rom, sanitize_title};
use crate::record::{DEFAULT_TICKRATE, Mode, RomRecord};
use crate::{Error, Result};

/// Catalog platforms octemu supports; anything else is skipped
const ARCHIVE_PLATFORMS: &[&str] = &["chip8", "schip"];

/// Name of the catalog file within the archive checkout
const ARCHIVE_CATALOG: &str = "programs.json";

/// Directory of ROM binaries within the archive checkout
const ARCHIVE_ROM_DIR: &str = "roms";

/// Extension of archive ROM binaries
const ARCHIVE_ROM_EXT: &str = "ch8";

/// Where ROM metadata comes from.
///
/// Selected explicitly by the caller - the CLI picks `Explicit` when a
/// config path was supplied and `Archive` otherwise.
#[derive(Debug, Clone)]
pub enum RomSource {
    /// Hand-written YAML or JSON config file
    Explicit { config: PathBuf },
    /// chip8Archive checkout root
    Archive { root: PathBuf },
}

impl RomSource {
    /// Loads and normalizes all ROM records from this source.
    ///
    /// Records are produced in the document order of the underlying
    /// config/catalog.  Any failure aborts the whole load.
    pub fn load(&self, policy: SanitizePolicy) -> Result<Vec<RomRecord>> {
        match self {
            RomSource::Explicit { config } => load_explicit(config, policy),
            RomSource::Archive { root } => load_archive(root, policy),
        }
    }
}

// Raw explicit config entry, before validation and defaulting.  Required
// fields are checked in normalize_explicit so errors can name the entry.
#[derive(Debug, Deserialize)]
struct ExplicitEntry {
    title: Option<String>,
    file: Option<PathBuf>,
    mode: Option<Mode>,
    tickrate: Option<u32>,
}

// Raw chip8Archive catalog entry.  Lenient on purpose: entries for
// unsupported platforms may lack fields we require, and they must not
// fail the parse - they are filtered out before validation.
#[derive(Debug, Deserialize)]
struct ArchiveEntry {
    platform: Option<String>,
    title: Option<String>,
    #[serde(default)]
    options: ArchiveOptions,
}

#[derive(Debug, Default, Deserialize)]
struct ArchiveOptions {
    #[serde(rename = "logicQuirks", default)]
    logic_quirks: bool,
    #[serde(rename = "jumpQuirks", default)]
    jump_quirks: bool,
    tickrate: Option<u32>,
}

impl ArchiveOptions {
    // Three-way classification, first matching rule wins
    fn infer_mode(&self) -> Mode {
        if self.logic_quirks {
            Mode::Chip8
        } else if self.jump_quirks {
            Mode::Schip
        } else {
            Mode::Octo
        }
    }
}

fn load_explicit(config: &Path, policy: SanitizePolicy) -> Result<Vec<RomRecord>> {
    let text = fs::read_to_string(config).map_err(|source| Error::ConfigRead {
        path: config.to_path_buf(),
        source,
    })?;

    let parse_err = |reason: String| Error::ConfigParse {
        path: config.to_path_buf(),
        reason,
    };

    // Parser is selected by extension.  Both parsers preserve document
    // order, which fixes the order of the generated ROM table.
    let extension = config.extension().and_then(|e| e.to_str());
    let entries: Vec<(String, ExplicitEntry)> = match extension {
        Some("json") => {
            let map: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&text).map_err(|e| parse_err(e.to_string()))?;
            map.into_iter()
                .map(|(name, value)| {
                    serde_json::from_value(value)
                        .map(|entry| (name, entry))
                        .map_err(|e| parse_err(e.to_string()))
                })
                .collect::<Result<_>>()?
        }
        Some("yaml") | Some("yml") => {
            let map: serde_yaml::Mapping =
                serde_yaml::from_str(&text).map_err(|e| parse_err(e.to_string()))?;
            map.into_iter()
                .map(|(key, value)| {
                    let name = key.as_str().unwrap_or_default().to_string();
                    serde_yaml::from_value(value)
                        .map(|entry| (name, entry))
                        .map_err(|e| parse_err(e.to_string()))
                })
                .collect::<Result<_>>()?
        }
        _ => {
            return Err(Error::UnsupportedConfigFormat {
                path: config.to_path_buf(),
            });
        }
    };

    let mut roms = Vec::with_capacity(entries.len());
    for (name, entry) in entries {
        roms.push(normalize_explicit(&name, entry, policy)?);
    }
    Ok(roms)
}

fn normalize_explicit(
    name: &str,
    entry: ExplicitEntry,
    policy: SanitizePolicy,
) -> Result<RomRecord> {
    let title = entry.title.ok_or_else(|| Error::MissingField {
        name: name.to_string(),
        field: "title",
    })?;
    let file = entry.file.ok_or_else(|| Error::MissingField {
        name: name.to_string(),
        field: "file",
    })?;

    let record = RomRecord {
        title: sanitize_title(&title, policy),
        mode: entry.mode.unwrap_or_default(),
        tickrate: entry.tickrate.unwrap_or(DEFAULT_TICKRATE),
        data: encode_rom(&file)?,
    };
    debug!(
        "{}: mode {}, tickrate {}, file {}",
        name,
        record.mode,
        record.tickrate,
        file.display()
    );
    Ok(record)
}

fn load_archive(root: &Path, policy: SanitizePolicy) -> Result<Vec<RomRecord>> {
    let catalog = root.join(ARCHIVE_CATALOG);
    let text = fs::read_to_string(&catalog).map_err(|source| Error::ConfigRead {
        path: catalog.clone(),
        source,
    })?;

    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&text).map_err(|e| Error::ConfigParse {
            path: catalog.clone(),
            reason: e.to_string(),
        })?;

    let mut roms = Vec::new();
    for (name, value) in map {
        let entry: ArchiveEntry =
            serde_json::from_value(value).map_err(|e| Error::ConfigParse {
                path: catalog.clone(),
                reason: format!("entry '{}': {}", name, e),
            })?;

        // Not an error - the catalog covers platforms octemu can't run
        match entry.platform.as_deref() {
            Some(platform) if ARCHIVE_PLATFORMS.contains(&platform) => {}
            other => {
                debug!("skipping {}: unsupported platform {:?}", name, other);
                continue;
            }
        }

        let title = entry.title.ok_or_else(|| Error::MissingField {
            name: name.clone(),
            field: "title",
        })?;
        // No default here, unlike the explicit source - the catalog is
        // machine generated and a missing tickrate means a broken entry
        let tickrate = entry.options.tickrate.ok_or_else(|| Error::MissingField {
            name: name.clone(),
            field: "tickrate",
        })?;
        let mode = entry.options.infer_mode();

        let rom_path = root
            .join(ARCHIVE_ROM_DIR)
            .join(format!("{}.{}", name, ARCHIVE_ROM_EXT));

        debug!(
            "{}: mode {}, tickrate {}, file {}",
            name,
            mode,
            tickrate,
            rom_path.display()
        );
        roms.push(RomRecord {
            title: sanitize_title(&title, policy),
            mode,
            tickrate,
            data: encode_rom(&rom_path)?,
        });
    }
    Ok(roms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(logic: bool, jump: bool) -> ArchiveOptions {
        ArchiveOptions {
            logic_quirks: logic,
            jump_quirks: jump,
            tickrate: Some(15),
        }
    }

    #[test]
    fn test_mode_inference_logic_wins() {
        assert_eq!(options(true, true).infer_mode(), Mode::Chip8);
        assert_eq!(options(true, false).infer_mode(), Mode::Chip8);
    }

    #[test]
    fn test_mode_inference_jump_second() {
        assert_eq!(options(false, true).infer_mode(), Mode::Schip);
    }

    #[test]
    fn test_mode_inference_default_octo() {
        assert_eq!(options(false, false).infer_mode(), Mode::Octo);
    }

    #[test]
    fn test_explicit_entry_defaults() {
        let dir = std::env::temp_dir().join("octemu-gen-defaults-test");
        fs::create_dir_all(&dir).unwrap();
        let rom = dir.join("pong.ch8");
        fs::write(&rom, [0x12, 0x00]).unwrap();

        let entry = ExplicitEntry {
            title: Some("Pong".to_string()),
            file: Some(rom),
            mode: None,
            tickrate: None,
        };
        let record = normalize_explicit("pong", entry, SanitizePolicy::Strip).unwrap();
        assert_eq!(record.mode, Mode::Octo);
        assert_eq!(record.tickrate, DEFAULT_TICKRATE);
        assert_eq!(record.data, "0x12, 0x00");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_explicit_missing_title() {
        let entry: ExplicitEntry = serde_json::from_str(r#"{"file": "pong.ch8"}"#).unwrap();
        let err = normalize_explicit("pong", entry, SanitizePolicy::Strip).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField { field: "title", .. }
        ));
    }

    #[test]
    fn test_explicit_missing_file() {
        let entry: ExplicitEntry = serde_json::from_str(r#"{"title": "Pong"}"#).unwrap();
        let err = normalize_explicit("pong", entry, SanitizePolicy::Strip).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "file", .. }));
    }

    #[test]
    fn test_archive_entry_lenient_parse() {
        // Entries for other platforms may omit options entirely and must
        // still deserialize
        let entry: ArchiveEntry =
            serde_json::from_str(r#"{"platform": "xochip", "title": "Big"}"#).unwrap();
        assert_eq!(entry.platform.as_deref(), Some("xochip"));
        assert!(entry.options.tickrate.is_none());
    }

    #[test]
    fn test_unsupported_config_extension() {
        // Read happens before format detection, so point at a real file
        let dir = std::env::temp_dir().join("octemu-gen-ext-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roms.toml");
        fs::write(&path, "x = 1").unwrap();
        let source = RomSource::Explicit { config: path };
        let err = source.load(SanitizePolicy::Strip).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConfigFormat { .. }));
        let _ = fs::remove_dir_all(&dir);
    }
}
