//! CLI subcommand implementations.

pub mod colors;
pub mod paint;
pub mod util;
