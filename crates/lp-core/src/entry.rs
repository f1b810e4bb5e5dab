//! Parsed transcript representation.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// One message within a parsed transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Wall-clock time of the message, second resolution. Sources that omit
    /// the date (IRC-style) anchor to the processing day, so such entries
    /// are only meaningful relative to each other.
    pub time: NaiveDateTime,
    /// Who sent the message. May be rewritten to a canonical name by the
    /// color stage.
    pub sender: String,
    /// Message body.
    pub message: String,
    /// Display color, set by the color stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    /// Override color for the sender marker, set by the color stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_color: Option<Rgb>,
    /// The source block this entry was parsed from, verbatim. Processors
    /// never modify it.
    pub raw: String,
    /// Extra key-value context.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl LogEntry {
    /// Creates an uncolored entry with empty metadata.
    #[must_use]
    pub fn new(
        time: NaiveDateTime,
        sender: impl Into<String>,
        message: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            time,
            sender: sender.into(),
            message: message.into(),
            color: None,
            name_color: None,
            raw: raw.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Copy of this entry with a different message, everything else shared.
    #[must_use]
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self.clone()
        }
    }
}

/// An ordered transcript. Insertion order is display order; entries are
/// never re-sorted by time.
pub type Log = Vec<LogEntry>;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn with_message_shares_everything_else() {
        let mut entry = LogEntry::new(noon(), "Alice", "hello", "raw text");
        entry.metadata.insert("source".into(), "qq".into());

        let copy = entry.with_message("bye");
        assert_eq!(copy.message, "bye");
        assert_eq!(copy.sender, entry.sender);
        assert_eq!(copy.raw, entry.raw);
        assert_eq!(copy.metadata, entry.metadata);
    }

    #[test]
    fn serde_skips_unset_colors() {
        let entry = LogEntry::new(noon(), "Alice", "hello", "raw");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("color").is_none());
        assert!(json.get("metadata").is_none());
    }
}
