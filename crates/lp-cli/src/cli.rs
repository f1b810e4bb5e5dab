//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{OutputFormat, TableFormat};

/// Which transcript parser to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ParserKind {
    /// Try every parser and keep the best result.
    #[default]
    Auto,
    /// QQ chat export (blank-line-separated blocks).
    Qq,
    /// IRC-style `H:M:S <nick> message` lines.
    Irc,
    /// Foundry VTT chat export.
    Fvtt,
}

/// Chat transcript painter.
///
/// Parses pasted chat logs (QQ, IRC, FVTT exports), runs them through a
/// cleanup pipeline, and renders styled output with consistent per-speaker
/// colors.
#[derive(Debug, Parser)]
#[command(name = "lp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a transcript and print styled output.
    Paint {
        /// Transcript file, or `-` for stdin.
        input: PathBuf,

        /// Parser to use.
        #[arg(long, value_enum, default_value_t = ParserKind::Auto)]
        parser: ParserKind,

        /// Output format (overrides the configured default).
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Color table file (.yaml/.yml for the structured form, anything
        /// else for the line-pair text form).
        #[arg(long)]
        colors: Option<PathBuf>,

        /// Omit the time prefix.
        #[arg(long)]
        no_time: bool,

        /// Omit the <sender> marker.
        #[arg(long)]
        no_sender: bool,
    },

    /// Manage per-speaker color tables.
    Colors {
        #[command(subcommand)]
        action: ColorsAction,
    },
}

/// Color table operations.
#[derive(Debug, Subcommand)]
pub enum ColorsAction {
    /// Assign palette colors to every speaker in a transcript and print the
    /// resulting table.
    Assign {
        /// Transcript file, or `-` for stdin.
        input: PathBuf,

        /// Existing table to extend; its assignments are kept.
        #[arg(long)]
        base: Option<PathBuf>,

        /// Serialization format for the printed table.
        #[arg(long, value_enum, default_value_t = TableFormat::Text)]
        output: TableFormat,
    },

    /// Convert a color table between the text and YAML forms.
    Convert {
        /// Table file, or `-` for stdin.
        input: PathBuf,

        /// Target format.
        #[arg(long, value_enum)]
        to: TableFormat,
    },
}
