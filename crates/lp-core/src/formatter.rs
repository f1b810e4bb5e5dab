//! Renderers for the processed log.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::entry::LogEntry;

/// Time rendering styles used across the output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    /// `2024-02-22 20:45:24`
    Full,
    /// `20:45:24`
    Short,
    /// `2024/02/22 20:45:24`
    Log,
}

/// Formats a timestamp in the given style.
#[must_use]
pub fn format_time(time: NaiveDateTime, style: TimeStyle) -> String {
    let spec = match style {
        TimeStyle::Full => "%Y-%m-%d %H:%M:%S",
        TimeStyle::Short => "%H:%M:%S",
        TimeStyle::Log => "%Y/%m/%d %H:%M:%S",
    };
    time.format(spec).to_string()
}

/// Which parts of each entry the text formatters emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FormatOptions {
    /// Include the time prefix.
    pub show_time: bool,
    /// Include the `<sender>` marker.
    pub show_sender: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            show_time: true,
            show_sender: true,
        }
    }
}

/// Renders a processed log to an output string.
pub trait LogFormatter {
    fn format(&self, log: &[LogEntry]) -> String;
}

fn body_color(entry: &LogEntry) -> Rgb {
    entry.color.unwrap_or(Rgb::BLACK)
}

/// BBCode renderer: one `[color=…]`-wrapped line per entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct BbcodeFormatter {
    options: FormatOptions,
}

impl BbcodeFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }
}

impl LogFormatter for BbcodeFormatter {
    fn format(&self, log: &[LogEntry]) -> String {
        log.iter()
            .map(|entry| {
                let mut line = String::new();
                if self.options.show_time {
                    line.push_str(&format!(
                        "[color=silver]{}[/color]",
                        format_time(entry.time, TimeStyle::Short)
                    ));
                }
                let color = body_color(entry).hex();
                if self.options.show_sender {
                    // A name-color override gets the sender its own span.
                    if let Some(name_color) = entry.name_color {
                        line.push_str(&format!(
                            "[color={}]<{}>[/color][color={color}]{}[/color]",
                            name_color.hex(),
                            entry.sender,
                            entry.message
                        ));
                    } else {
                        line.push_str(&format!(
                            "[color={color}]<{}>{}[/color]",
                            entry.sender, entry.message
                        ));
                    }
                } else {
                    line.push_str(&format!("[color={color}]{}[/color]", entry.message));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// HTML renderer: `<span>` pairs per entry, `<br>`-terminated.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter {
    options: FormatOptions,
}

impl HtmlFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }
}

impl LogFormatter for HtmlFormatter {
    fn format(&self, log: &[LogEntry]) -> String {
        log.iter()
            .map(|entry| {
                let mut line = String::new();
                if self.options.show_time {
                    line.push_str(&format!(
                        "<span style=\"color:silver\">{}</span>",
                        format_time(entry.time, TimeStyle::Short)
                    ));
                }
                let color = body_color(entry).hex();
                if self.options.show_sender {
                    if let Some(name_color) = entry.name_color {
                        line.push_str(&format!(
                            "<span style=\"color:{}\">&lt;{}&gt;</span><span style=\"color:{color}\">{}</span>",
                            name_color.hex(),
                            entry.sender,
                            entry.message
                        ));
                    } else {
                        line.push_str(&format!(
                            "<span style=\"color:{color}\">&lt;{}&gt;{}</span>",
                            entry.sender, entry.message
                        ));
                    }
                } else {
                    line.push_str(&format!(
                        "<span style=\"color:{color}\">{}</span>",
                        entry.message
                    ));
                }
                line.push_str("<br>");
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One row of the structured output boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub time: String,
    pub sender: String,
    pub message: String,
}

/// Produces [`Row`]s for structured consumers (UI tables, JSON export).
#[derive(Debug, Clone, Copy, Default)]
pub struct RowFormatter;

impl RowFormatter {
    #[must_use]
    pub fn format(&self, log: &[LogEntry]) -> Vec<Row> {
        log.iter()
            .map(|entry| Row {
                time: format_time(entry.time, TimeStyle::Short),
                sender: entry.sender.clone(),
                message: entry.message.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use insta::assert_snapshot;

    use super::*;

    fn entry(sender: &str, text: &str, color: Option<Rgb>, name_color: Option<Rgb>) -> LogEntry {
        let time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut e = LogEntry::new(time, sender, text, "raw");
        e.color = color;
        e.name_color = name_color;
        e
    }

    fn sample_log() -> Vec<LogEntry> {
        vec![
            entry(
                "Alice",
                "Hello, world!",
                Some(Rgb::new(255, 0, 0)),
                Some(Rgb::new(0, 255, 0)),
            ),
            entry("Bob", "Hi, Alice!", Some(Rgb::new(0, 0, 255)), None),
        ]
    }

    #[test]
    fn bbcode_default_shows_time_and_sender() {
        let out = BbcodeFormatter::new().format(&sample_log());
        assert_snapshot!(out, @r"
        [color=silver]12:00:00[/color][color=#00ff00]<Alice>[/color][color=#ff0000]Hello, world![/color]
        [color=silver]12:00:00[/color][color=#0000ff]<Bob>Hi, Alice![/color]
        ");
    }

    #[test]
    fn bbcode_option_combinations() {
        let log = sample_log();

        let out = BbcodeFormatter::with_options(FormatOptions {
            show_time: false,
            ..Default::default()
        })
        .format(&log);
        assert!(!out.contains("[color=silver]"));
        assert!(out.contains("<Alice>"));

        let out = BbcodeFormatter::with_options(FormatOptions {
            show_sender: false,
            ..Default::default()
        })
        .format(&log);
        assert!(!out.contains("<Alice>"));
        assert!(out.contains("[color=silver]"));
        assert!(out.contains("[color=#ff0000]Hello, world![/color]"));

        let out = BbcodeFormatter::with_options(FormatOptions {
            show_time: false,
            show_sender: false,
        })
        .format(&log);
        assert_eq!(
            out,
            "[color=#ff0000]Hello, world![/color]\n[color=#0000ff]Hi, Alice![/color]"
        );
    }

    #[test]
    fn bbcode_uncolored_entry_falls_back_to_black() {
        let out = BbcodeFormatter::new().format(&[entry("A", "hi", None, None)]);
        assert!(out.contains("[color=#000000]<A>hi[/color]"));
    }

    #[test]
    fn html_default_shows_time_and_sender() {
        let out = HtmlFormatter::new().format(&sample_log());
        assert_snapshot!(out, @r#"
        <span style="color:silver">12:00:00</span><span style="color:#00ff00">&lt;Alice&gt;</span><span style="color:#ff0000">Hello, world!</span><br>
        <span style="color:silver">12:00:00</span><span style="color:#0000ff">&lt;Bob&gt;Hi, Alice!</span><br>
        "#);
    }

    #[test]
    fn html_option_combinations() {
        let log = sample_log();

        let out = HtmlFormatter::with_options(FormatOptions {
            show_time: false,
            show_sender: false,
        })
        .format(&log);
        assert!(!out.contains("color:silver"));
        assert!(!out.contains("&lt;Alice&gt;"));
        assert!(out.contains("Hello, world!"));
    }

    #[test]
    fn rows_carry_short_time() {
        let rows = RowFormatter.format(&sample_log());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, "12:00:00");
        assert_eq!(rows[0].sender, "Alice");
        assert_eq!(rows[1].message, "Hi, Alice!");
    }

    #[test]
    fn time_styles() {
        let time = NaiveDate::from_ymd_opt(2024, 2, 22)
            .unwrap()
            .and_hms_opt(20, 45, 24)
            .unwrap();
        assert_eq!(format_time(time, TimeStyle::Full), "2024-02-22 20:45:24");
        assert_eq!(format_time(time, TimeStyle::Short), "20:45:24");
        assert_eq!(format_time(time, TimeStyle::Log), "2024/02/22 20:45:24");
    }
}
