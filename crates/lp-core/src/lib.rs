//! Core pipeline for turning chat-log transcripts into styled output.
//!
//! This crate contains the fundamental types and logic for:
//! - Parsing: recognizing QQ, IRC, and FVTT transcript formats
//! - Processing: pure transforms over the parsed entry sequence
//! - Coloring: deterministic per-speaker color assignment with aliases
//! - Formatting: rendering entries to HTML, BBCode, or structured rows
//!
//! Data flows one way: raw text → parser → [`Log`] → processor chain →
//! formatter. All steps are synchronous and operate on in-memory values;
//! callers hand the core a fully decoded string and get a string (or rows)
//! back.

pub mod color;
pub mod colorer;
mod entry;
pub mod formatter;
pub mod painter;
pub mod parser;
pub mod processor;

pub use color::{ColorParseError, DEFAULT_PALETTE, Rgb, delta_e};
pub use colorer::{AliasMode, ColorConfig, ColorEntry, ColorTableError, MIN_DIFF};
pub use entry::{Log, LogEntry};
pub use formatter::{
    BbcodeFormatter, FormatOptions, HtmlFormatter, LogFormatter, Row, RowFormatter, TimeStyle,
    format_time,
};
pub use painter::{LogPainter, PaintError};
pub use parser::{AutoDetectParser, FvttLogParser, IrcLogParser, LogParser, QqTextParser};
pub use processor::{
    ColorProcessor, LogProcessor, ProcessorConfig, ProcessorGroup, RemoveDiceCommand,
    RemoveEmptyMessage, RemoveImage, RemoveParentheses, ReplaceMe, SplitMultiline,
};
