//! Transcript parsers for the supported source formats.
//!
//! Every parser takes a complete decoded buffer and produces a [`Log`].
//! Malformed lines and blocks are skipped, never reported as errors: the
//! absence of an entry is itself the signal.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};

use crate::entry::{Log, LogEntry};

/// A transcript parser.
pub trait LogParser {
    /// Parses a raw transcript into ordered entries.
    fn parse(&self, raw: &str) -> Log;
}

/// QQ header, timestamp first: `2024-1-1 12:34:56 sender(10001)`.
static QQ_TIME_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<y>\d{4})-(?P<mo>\d{1,2})-(?P<d>\d{1,2})\s+(?P<h>\d{1,2}):(?P<mi>\d{1,2}):(?P<s>\d{1,2})\s+(?P<sender>[^(]+?)(?:\([^)]+\))?$",
    )
    .unwrap()
});

/// QQ header, timestamp last: `【noise】sender 2024/1/1 12:34:56`.
static QQ_TIME_LAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:【[^】]*】)?(?P<sender>\D+?)\s+(?P<y>\d{4})/(?P<mo>\d{1,2})/(?P<d>\d{1,2})\s+(?P<h>\d{1,2}):(?P<mi>\d{1,2}):(?P<s>\d{1,2})",
    )
    .unwrap()
});

/// IRC line: `12:34:56 <sender> message`.
static IRC_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<h>\d{1,2}):(?P<mi>\d{1,2}):(?P<s>\d{1,2})\s+<(?P<sender>[^>]+)>\s?(?P<msg>.*)$")
        .unwrap()
});

/// FVTT header: `[1/31/2024, 9:05:07 PM] sender`.
static FVTT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[(?P<mo>\d{1,2})/(?P<d>\d{1,2})/(?P<y>\d{4}),\s*(?P<h>\d{1,2}):(?P<mi>\d{1,2}):(?P<s>\d{1,2})\s*(?P<ap>[AP]M)\]\s*(?P<sender>\S.*)$",
    )
    .unwrap()
});

/// FVTT entry terminator: a line of nothing but dashes.
static FVTT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-{2,}$").unwrap());

fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

fn capture_num(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

/// Builds a timestamp from `y`/`mo`/`d`/`h`/`mi`/`s` capture groups.
/// Out-of-range components yield `None` and the caller drops the block.
fn capture_datetime(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let year: i32 = caps.name("y")?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, capture_num(caps, "mo")?, capture_num(caps, "d")?)?;
    date.and_hms_opt(
        capture_num(caps, "h")?,
        capture_num(caps, "mi")?,
        capture_num(caps, "s")?,
    )
}

/// Parser for QQ chat exports: blank-line-separated blocks whose first line
/// is a header and whose remaining lines are the message body.
///
/// Two header shapes are accepted: `2025-2-15 20:39:56 sender(10001)` with
/// the parenthesized id optional and discarded, and
/// `【noise】sender 2025/2/22 20:45:24` with the bracketed prefix optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct QqTextParser;

impl LogParser for QqTextParser {
    fn parse(&self, raw: &str) -> Log {
        let raw = normalize_newlines(raw);
        let mut log = Log::new();

        for block in raw.split("\n\n") {
            let lines: Vec<&str> = block.trim().split('\n').collect();
            if lines.len() < 2 {
                continue;
            }
            let header = lines[0];
            let message = lines[1..].join("\n");

            let caps = QQ_TIME_FIRST
                .captures(header)
                .or_else(|| QQ_TIME_LAST.captures(header));
            let Some(caps) = caps else {
                tracing::trace!(header, "skipping block with unrecognized header");
                continue;
            };
            let (Some(time), Some(sender)) = (capture_datetime(&caps), caps.name("sender")) else {
                tracing::trace!(header, "skipping block with invalid timestamp");
                continue;
            };

            log.push(LogEntry::new(
                time,
                sender.as_str().trim(),
                message.trim(),
                block,
            ));
        }
        log
    }
}

/// Parser for IRC-style logs: one `H:M:S <sender> message` entry per line.
///
/// The source format carries no date, so entries are anchored to the
/// processing day and are only same-day-relative.
#[derive(Debug, Clone, Copy, Default)]
pub struct IrcLogParser;

impl LogParser for IrcLogParser {
    fn parse(&self, raw: &str) -> Log {
        let raw = normalize_newlines(raw);
        let today = Local::now().date_naive();
        let mut log = Log::new();

        for line in raw.lines() {
            let Some(caps) = IRC_LINE.captures(line) else {
                continue;
            };
            let time = capture_num(&caps, "h")
                .zip(capture_num(&caps, "mi"))
                .zip(capture_num(&caps, "s"))
                .and_then(|((h, m), s)| today.and_hms_opt(h, m, s));
            let Some(time) = time else {
                tracing::trace!(line, "skipping line with invalid time of day");
                continue;
            };
            log.push(LogEntry::new(
                time,
                caps["sender"].trim(),
                &caps["msg"],
                line,
            ));
        }
        log
    }
}

/// Parser for Foundry VTT chat exports.
///
/// A `[M/D/YYYY, H:M:S AM|PM] sender` header opens an entry, following lines
/// accumulate into its message, and a line of dashes closes it. An entry
/// still open at end of input is emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FvttLogParser;

struct OpenEntry {
    time: NaiveDateTime,
    sender: String,
    body: Vec<String>,
    raw: Vec<String>,
}

impl OpenEntry {
    fn finish(self) -> LogEntry {
        LogEntry::new(
            self.time,
            self.sender,
            self.body.join("\n").trim(),
            self.raw.join("\n"),
        )
    }
}

fn fvtt_header(line: &str) -> Option<(NaiveDateTime, String)> {
    let caps = FVTT_HEADER.captures(line)?;
    let year: i32 = caps.name("y")?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, capture_num(&caps, "mo")?, capture_num(&caps, "d")?)?;
    let hour12 = capture_num(&caps, "h")?;
    if !(1..=12).contains(&hour12) {
        return None;
    }
    let hour = hour12 % 12 + if &caps["ap"] == "PM" { 12 } else { 0 };
    let time = date.and_hms_opt(hour, capture_num(&caps, "mi")?, capture_num(&caps, "s")?)?;
    Some((time, caps["sender"].trim().to_string()))
}

impl LogParser for FvttLogParser {
    fn parse(&self, raw: &str) -> Log {
        let raw = normalize_newlines(raw);
        let mut log = Log::new();
        let mut open: Option<OpenEntry> = None;

        for line in raw.lines() {
            if let Some((time, sender)) = fvtt_header(line) {
                // A header while an entry is open closes the previous entry.
                if let Some(entry) = open.take() {
                    log.push(entry.finish());
                }
                open = Some(OpenEntry {
                    time,
                    sender,
                    body: Vec::new(),
                    raw: vec![line.to_string()],
                });
            } else if FVTT_SEPARATOR.is_match(line.trim()) {
                if let Some(entry) = open.take() {
                    log.push(entry.finish());
                }
            } else if let Some(entry) = open.as_mut() {
                entry.body.push(line.to_string());
                entry.raw.push(line.to_string());
            }
        }
        if let Some(entry) = open.take() {
            log.push(entry.finish());
        }
        log
    }
}

/// Tries every concrete parser and keeps the result with the most entries.
///
/// Ties keep the earliest-tried parser (QQ, then IRC, then FVTT). When
/// nothing matches anywhere the result is an empty log, not an error.
pub struct AutoDetectParser {
    parsers: Vec<(&'static str, Box<dyn LogParser>)>,
}

impl Default for AutoDetectParser {
    fn default() -> Self {
        Self {
            parsers: vec![
                ("qq", Box::new(QqTextParser)),
                ("irc", Box::new(IrcLogParser)),
                ("fvtt", Box::new(FvttLogParser)),
            ],
        }
    }
}

impl AutoDetectParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogParser for AutoDetectParser {
    fn parse(&self, raw: &str) -> Log {
        let mut best: Log = Log::new();
        let mut best_name = "";
        for (name, parser) in &self.parsers {
            let log = parser.parse(raw);
            if log.len() > best.len() {
                best = log;
                best_name = name;
            }
        }
        if !best.is_empty() {
            tracing::debug!(parser = best_name, entries = best.len(), "auto-detected format");
        }
        best
    }
}
