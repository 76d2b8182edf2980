// Copyright (C) 2025 Piers Finlayson <piers@piers.rocks>
//
// MIT License

//! Thin wrapper around the template engine.
//!
//! The records are exposed to the template as the list variable `roms`.
//! Escaping is disabled - the output is C source, not markup.

use handlebars::Handlebars;

use crate::Result;
use crate::record::RomRecord;

/// Renders `template` with the normalized records bound to `roms`.
pub fn render(template: &str, roms: &[RomRecord]) -> Result<String> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    let rendered = registry.render_template(template, &serde_json::json!({ "roms": roms }))?;
    Ok(rendered)
}
