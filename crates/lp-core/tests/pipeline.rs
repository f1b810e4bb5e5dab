//! End-to-end pipeline scenarios across parser, processors, and formatters.

use lp_core::{
    AutoDetectParser, BbcodeFormatter, ColorConfig, ColorProcessor, LogFormatter, LogPainter,
    LogParser, ProcessorConfig, ProcessorGroup, QqTextParser, Rgb, RowFormatter,
};

#[test]
fn qq_block_through_default_chain_to_bbcode() {
    let raw = "2023-04-28 17:58:21 Alice(10001)\n今天的天气真不错";
    let config = ColorConfig::single("Alice", Rgb::new(255, 0, 0), &[]);

    let painter = LogPainter::new(Box::new(QqTextParser))
        .pipe(Box::new(ProcessorGroup::new(ProcessorConfig::default().build())))
        .pipe(Box::new(ColorProcessor::new(config)))
        .with_formatter(Box::new(BbcodeFormatter::new()));

    assert_eq!(
        painter.paint(raw).unwrap(),
        "[color=silver]17:58:21[/color][color=#ff0000]<Alice>今天的天气真不错[/color]"
    );
}

#[test]
fn me_marker_expands_before_coloring() {
    let raw = "2023-04-28 17:58:21 Kai(10002)\nhello /me waves";

    let painter = LogPainter::new(Box::new(QqTextParser))
        .pipe(Box::new(ProcessorGroup::new(ProcessorConfig::default().build())))
        .pipe(Box::new(ColorProcessor::with_auto_assign(ColorConfig::new())));

    let rows = painter.paint_rows(raw);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].message, "hello");
    assert_eq!(rows[1].message, "Kaiwaves");
    assert_eq!(rows[0].sender, "Kai");
}

#[test]
fn auto_detect_extracts_fvtt_among_noise() {
    let raw = "session export\n\
               [2/15/2024, 9:05:07 PM] Gamemaster\n\
               The door creaks open.\n\
               --------------------------\n\
               some trailing junk";

    let log = AutoDetectParser::new().parse(raw);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].sender, "Gamemaster");
    assert_eq!(log[0].message, "The door creaks open.");
}

#[test]
fn disabled_speaker_never_reaches_output() {
    let raw = "2023-04-28 17:58:21 Narrator\nscene text\n\n2023-04-28 17:58:30 Alice\nactual line";
    let config = ColorConfig::single("Narrator", Rgb::new(255, 0, 0), &[])
        .set_disabled("Narrator", true)
        .merge(&ColorConfig::single("Alice", Rgb::new(0, 0, 255), &[]));

    let painter = LogPainter::new(Box::new(QqTextParser))
        .pipe(Box::new(ColorProcessor::new(config)))
        .with_formatter(Box::new(BbcodeFormatter::new()));

    let out = painter.paint(raw).unwrap();
    assert!(!out.contains("scene text"));
    assert!(out.contains("<Alice>actual line"));
}

#[test]
fn alias_preservation_keeps_display_name() {
    let raw = "2023-04-28 17:58:21 游客1\n你好";
    let config = ColorConfig::single("Dave", Rgb::new(255, 0, 0), &["游客1"])
        .set_alias_mode("Dave", lp_core::AliasMode::PreserveAlias);

    let painter =
        LogPainter::new(Box::new(QqTextParser)).pipe(Box::new(ColorProcessor::new(config)));
    let log = painter.paint_rows(raw);
    assert_eq!(log[0].sender, "游客1");
}

#[test]
fn color_table_survives_text_export_and_reimport() {
    let base = ColorConfig::new().assign_colors(&["Alice", "Bob", "Carol"]);
    let restored = ColorConfig::from_text(&base.to_text());

    for name in ["Alice", "Bob", "Carol"] {
        assert_eq!(restored.get_color(name), base.get_color(name));
    }
}

#[test]
fn rows_and_formatter_agree_on_content() {
    let raw = "2023-04-28 17:58:21 Alice\nhello there";
    let parser = QqTextParser;
    let log = parser.parse(raw);

    let rows = RowFormatter.format(&log);
    let text = BbcodeFormatter::new().format(&log);

    assert_eq!(rows[0].time, "17:58:21");
    assert!(text.contains(&rows[0].message));
    assert!(text.contains(&rows[0].sender));
}
