// Copyright (C) 2025 Piers Finlayson <piers@piers.rocks>
//
// MIT License

//! romc-gen - generates the embedded ROM source file for octemu.
//!
//! With a config path, ROM metadata comes from that YAML/JSON file; without
//! one, the chip8Archive catalog is used.  The normalized records are
//! rendered through a `rom.c` template and written to the output path.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
#[allow(unused_imports)]
use log::{debug, info, warn};

use octemu_gen::{RomSource, SanitizePolicy};

// Built-in template producing the emu_roms[] table the pico firmware
// links against
const DEFAULT_TEMPLATE: &str = include_str!("../templates/rom.c.hbs");

const DEFAULT_ARCHIVE_ROOT: &str = "../chip8Archive";

#[derive(Parser)]
#[command(name = "romc-gen")]
#[command(version, about = "Generate the embedded ROM source file for octemu")]
struct Cli {
    /// Output file name; a trailing `.c` is optional
    output: String,

    /// Explicit ROM config (YAML or JSON); omit to use the chip8Archive
    /// catalog
    config: Option<PathBuf>,

    /// Path to a chip8Archive checkout
    #[arg(long, default_value = DEFAULT_ARCHIVE_ROOT)]
    archive: PathBuf,

    /// Template to render instead of the built-in rom.c template
    #[arg(long)]
    template: Option<PathBuf>,

    /// How to sanitize titles for embedding in a string literal
    #[arg(long, value_enum, default_value_t = SanitizeArg::Strip)]
    sanitize: SanitizeArg,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SanitizeArg {
    /// Remove double quotes and backslashes
    Strip,
    /// Replace double quotes with underscores, remove backslashes
    Underscore,
}

impl From<SanitizeArg> for SanitizePolicy {
    fn from(arg: SanitizeArg) -> Self {
        match arg {
            SanitizeArg::Strip => SanitizePolicy::Strip,
            SanitizeArg::Underscore => SanitizePolicy::Underscore,
        }
    }
}

// Strips one trailing `.c` if present, then appends `.c`, so `foo` and
// `foo.c` name the same output file
fn output_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}.c", name.strip_suffix(".c").unwrap_or(name)))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = match &cli.config {
        Some(config) => RomSource::Explicit {
            config: config.clone(),
        },
        None => RomSource::Archive {
            root: cli.archive.clone(),
        },
    };
    debug!("ROM source: {:?}", source);

    let roms = source.load(cli.sanitize.into())?;
    if roms.is_empty() {
        anyhow::bail!("no ROMs to embed");
    }

    let template = match &cli.template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let rendered = octemu_gen::render(&template, &roms).context("Failed to render ROM template")?;

    let output = output_path(&cli.output);
    fs::write(&output, rendered)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Generated {}: {} ROM(s) embedded",
        output.display(),
        roms.len()
    );

    Ok(())
}
