//! Shared utilities for CLI commands.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use lp_core::ColorConfig;

/// Read an input argument, treating `-` as stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read from stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))
}

/// Load a color table from a file, picking the deserializer by extension.
///
/// `.yaml` and `.yml` files use the structured YAML form; everything else is
/// parsed as the line-pair text form, which accepts any input.
pub fn load_table(path: &Path) -> Result<ColorConfig> {
    let raw = read_input(path)?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        ColorConfig::from_yaml(&raw)
            .with_context(|| format!("failed to parse color table: {}", path.display()))
    } else {
        Ok(ColorConfig::from_text(&raw))
    }
}
