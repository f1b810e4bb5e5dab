//! Implementation of the `lp colors` subcommands.
//!
//! `assign` extends a color table with palette assignments for every speaker
//! in a transcript; `convert` rewrites a table between its two on-disk forms.

use std::path::Path;

use anyhow::{Context, Result};
use lp_core::{AutoDetectParser, ColorConfig, LogParser};

use crate::commands::util;
use crate::config::TableFormat;

/// Unique sender names in first-appearance order.
fn unique_senders(raw: &str) -> Vec<String> {
    let log = AutoDetectParser::new().parse(raw);
    let mut seen = std::collections::HashSet::new();
    log.into_iter()
        .filter_map(|entry| seen.insert(entry.sender.clone()).then_some(entry.sender))
        .collect()
}

fn print_table(table: &ColorConfig, format: TableFormat) -> Result<()> {
    let rendered = match format {
        TableFormat::Text => table.to_text(),
        TableFormat::Yaml => table.to_yaml().context("failed to serialize color table")?,
    };
    println!("{rendered}");
    Ok(())
}

/// Run the `colors assign` command.
pub fn assign(input: &Path, base: Option<&Path>, output: TableFormat) -> Result<()> {
    let raw = util::read_input(input)?;

    let base_table = match base {
        Some(path) => util::load_table(path)?,
        None => ColorConfig::new(),
    };

    let senders = unique_senders(&raw);
    tracing::debug!(count = senders.len(), "assigning colors to speakers");

    let table = base_table.assign_colors(&senders);
    print_table(&table, output)
}

/// Run the `colors convert` command.
///
/// The source form is detected by trying YAML first; anything that is not a
/// valid entry list falls back to the line-pair text form.
pub fn convert(input: &Path, to: TableFormat) -> Result<()> {
    let raw = util::read_input(input)?;

    let table = ColorConfig::from_yaml(&raw).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "input is not a YAML table, parsing as text");
        ColorConfig::from_text(&raw)
    });

    print_table(&table, to)
}
