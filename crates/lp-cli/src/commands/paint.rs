//! Implementation of the `lp paint` command.
//!
//! Reads a transcript, runs it through the parse → process → color → format
//! pipeline, and prints the rendered result to stdout.

use std::path::Path;

use anyhow::{Context, Result};
use lp_core::{
    AutoDetectParser, BbcodeFormatter, ColorConfig, ColorProcessor, FvttLogParser, HtmlFormatter,
    IrcLogParser, LogParser, LogPainter, ProcessorGroup, QqTextParser,
};

use crate::commands::util;
use crate::config::OutputFormat;
use crate::{Config, ParserKind};

/// Options resolved from CLI flags and config for a single paint run.
#[derive(Debug)]
pub struct PaintArgs<'a> {
    pub input: &'a Path,
    pub parser: ParserKind,
    pub format: Option<OutputFormat>,
    pub colors: Option<&'a Path>,
    pub no_time: bool,
    pub no_sender: bool,
}

fn make_parser(kind: ParserKind) -> Box<dyn LogParser> {
    match kind {
        ParserKind::Auto => Box::new(AutoDetectParser::new()),
        ParserKind::Qq => Box::new(QqTextParser),
        ParserKind::Irc => Box::new(IrcLogParser),
        ParserKind::Fvtt => Box::new(FvttLogParser),
    }
}

/// Run the paint command.
pub fn run(args: &PaintArgs<'_>, config: &Config) -> Result<()> {
    let raw = util::read_input(args.input)?;

    let table = match args.colors {
        Some(path) => util::load_table(path)?,
        None => ColorConfig::new(),
    };

    let mut options = config.formatter;
    if args.no_time {
        options.show_time = false;
    }
    if args.no_sender {
        options.show_sender = false;
    }

    let painter = LogPainter::new(make_parser(args.parser))
        .pipe(Box::new(ProcessorGroup::new(config.processors.build())))
        .pipe(Box::new(ColorProcessor::with_auto_assign(table)));

    let format = args.format.unwrap_or(config.format);
    let output = match format {
        OutputFormat::Bbcode => painter
            .with_formatter(Box::new(BbcodeFormatter::with_options(options)))
            .paint(&raw)
            .context("failed to render transcript")?,
        OutputFormat::Html => painter
            .with_formatter(Box::new(HtmlFormatter::with_options(options)))
            .paint(&raw)
            .context("failed to render transcript")?,
        OutputFormat::Json => {
            let rows = painter.paint_rows(&raw);
            serde_json::to_string_pretty(&rows).context("failed to serialize rows")?
        }
    };

    println!("{output}");
    Ok(())
}
