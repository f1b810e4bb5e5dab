//! Pipeline orchestrator: parser → processors → formatter.

use thiserror::Error;

use crate::entry::Log;
use crate::formatter::{LogFormatter, Row, RowFormatter};
use crate::parser::LogParser;
use crate::processor::LogProcessor;

/// Errors from a miswired pipeline. Bad input data never lands here; it is
/// absorbed earlier as dropped entries.
#[derive(Debug, Error)]
pub enum PaintError {
    /// `paint` was invoked without a formatter. This is a composition bug in
    /// the caller, not an input problem, so it fails loudly instead of
    /// producing empty output.
    #[error("formatter not set")]
    FormatterNotSet,
}

/// Strings a parser, a processor chain, and a formatter together.
///
/// ```
/// use lp_core::{BbcodeFormatter, LogPainter, QqTextParser, RemoveEmptyMessage};
///
/// let painter = LogPainter::new(Box::new(QqTextParser))
///     .pipe(Box::new(RemoveEmptyMessage))
///     .with_formatter(Box::new(BbcodeFormatter::new()));
/// let out = painter.paint("2024-1-1 9:30:00 Alice\nhello").unwrap();
/// assert!(out.contains("<Alice>hello"));
/// ```
pub struct LogPainter {
    parser: Box<dyn LogParser>,
    processors: Vec<Box<dyn LogProcessor>>,
    formatter: Option<Box<dyn LogFormatter>>,
}

impl LogPainter {
    #[must_use]
    pub fn new(parser: Box<dyn LogParser>) -> Self {
        Self {
            parser,
            processors: Vec::new(),
            formatter: None,
        }
    }

    /// Appends a processor stage. Stages run in the order they were piped.
    #[must_use]
    pub fn pipe(mut self, processor: Box<dyn LogProcessor>) -> Self {
        self.processors.push(processor);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn LogFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    fn run(&self, raw: &str) -> Log {
        self.processors
            .iter()
            .fold(self.parser.parse(raw), |log, processor| {
                processor.process(log)
            })
    }

    /// Parses, processes, and formats a raw transcript.
    pub fn paint(&self, raw: &str) -> Result<String, PaintError> {
        let formatter = self.formatter.as_ref().ok_or(PaintError::FormatterNotSet)?;
        Ok(formatter.format(&self.run(raw)))
    }

    /// Parses and processes a raw transcript into structured rows. Does not
    /// require a formatter.
    #[must_use]
    pub fn paint_rows(&self, raw: &str) -> Vec<Row> {
        RowFormatter.format(&self.run(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::BbcodeFormatter;
    use crate::parser::QqTextParser;
    use crate::processor::{RemoveEmptyMessage, SplitMultiline};

    #[test]
    fn paint_without_formatter_fails_loudly() {
        let painter = LogPainter::new(Box::new(QqTextParser));
        let err = painter.paint("whatever").unwrap_err();
        assert!(matches!(err, PaintError::FormatterNotSet));
    }

    #[test]
    fn processors_run_in_pipe_order() {
        let painter = LogPainter::new(Box::new(QqTextParser))
            .pipe(Box::new(SplitMultiline))
            .pipe(Box::new(RemoveEmptyMessage))
            .with_formatter(Box::new(BbcodeFormatter::new()));

        let out = painter
            .paint("2024-1-1 9:30:00 Alice\nfirst\nsecond")
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
    }

    #[test]
    fn paint_rows_does_not_need_a_formatter() {
        let painter = LogPainter::new(Box::new(QqTextParser));
        let rows = painter.paint_rows("2024-1-1 9:30:00 Alice\nhello");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sender, "Alice");
        assert_eq!(rows[0].time, "09:30:00");
    }

    #[test]
    fn empty_input_paints_to_empty_output() {
        let painter = LogPainter::new(Box::new(QqTextParser))
            .with_formatter(Box::new(BbcodeFormatter::new()));
        assert_eq!(painter.paint("").unwrap(), "");
    }
}
