//! Transcript painter CLI library.
//!
//! This crate provides the CLI interface over the `lp-core` pipeline.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, ColorsAction, Commands, ParserKind};
pub use config::{Config, OutputFormat, TableFormat};
