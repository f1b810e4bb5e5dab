//! Pure transforms over a parsed log.
//!
//! Each processor maps a [`Log`] to a [`Log`] with no shared state; stages
//! compose left-to-right through [`ProcessorGroup`]. The canonical chain is
//! split-multiline → remove-image → replace-/me → remove-dice-command →
//! remove-parentheses → remove-empty-message, with the color stage applied
//! after any stage that can rewrite senders.

use serde::{Deserialize, Serialize};

use crate::colorer::{AliasMode, ColorConfig};
use crate::entry::Log;

/// Image placeholder token QQ inserts for inline pictures.
const IMAGE_TOKEN: &str = "[图片]";

/// Out-of-character action marker.
const ME_TOKEN: &str = "/me";

/// A log transform stage.
pub trait LogProcessor {
    fn process(&self, log: Log) -> Log;
}

/// Folds a list of processors over the log, left to right.
pub struct ProcessorGroup {
    processors: Vec<Box<dyn LogProcessor>>,
}

impl ProcessorGroup {
    #[must_use]
    pub fn new(processors: Vec<Box<dyn LogProcessor>>) -> Self {
        Self { processors }
    }
}

impl LogProcessor for ProcessorGroup {
    fn process(&self, log: Log) -> Log {
        self.processors
            .iter()
            .fold(log, |log, processor| processor.process(log))
    }
}

/// Strips every image placeholder token from messages. Never changes the
/// entry count; stripped-to-empty messages are left for [`RemoveEmptyMessage`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveImage;

impl LogProcessor for RemoveImage {
    fn process(&self, log: Log) -> Log {
        log.into_iter()
            .map(|entry| {
                let message = entry.message.replace(IMAGE_TOKEN, "").trim().to_string();
                entry.with_message(message)
            })
            .collect()
    }
}

/// Drops dice-roll commands: messages starting with `.` followed by an
/// ASCII letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveDiceCommand;

impl LogProcessor for RemoveDiceCommand {
    fn process(&self, log: Log) -> Log {
        log.into_iter()
            .filter(|entry| {
                let mut chars = entry.message.trim().chars();
                !(chars.next() == Some('.')
                    && chars.next().is_some_and(|c| c.is_ascii_alphabetic()))
            })
            .collect()
    }
}

/// Drops out-of-character chatter: messages starting with `(` or `（`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveParentheses;

impl LogProcessor for RemoveParentheses {
    fn process(&self, log: Log) -> Log {
        log.into_iter()
            .filter(|entry| {
                !matches!(entry.message.trim().chars().next(), Some('(' | '（'))
            })
            .collect()
    }
}

/// Drops entries whose trimmed message is empty. Must run last in any chain
/// whose stages can empty a message out.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveEmptyMessage;

impl LogProcessor for RemoveEmptyMessage {
    fn process(&self, log: Log) -> Log {
        log.into_iter()
            .filter(|entry| !entry.message.trim().is_empty())
            .collect()
    }
}

/// Rewrites the `/me` action marker using the sender's name.
///
/// A message starting with `/me ` becomes the sender concatenated directly
/// (no separator) to the remainder. Otherwise the message is split on every
/// bare `/me`; a single surviving fragment leaves the entry unchanged, while
/// multiple fragments each become their own entry, the first keeping its
/// plain text and the rest getting the sender prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceMe;

impl LogProcessor for ReplaceMe {
    fn process(&self, log: Log) -> Log {
        log.into_iter()
            .flat_map(|entry| {
                let message = entry.message.trim();

                if let Some(rest) = message.strip_prefix("/me ") {
                    let replaced = format!("{}{rest}", entry.sender);
                    return vec![entry.with_message(replaced)];
                }

                let fragments: Vec<&str> = message
                    .split(ME_TOKEN)
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .collect();
                if fragments.len() == 1 {
                    return vec![entry];
                }

                fragments
                    .iter()
                    .enumerate()
                    .map(|(i, part)| {
                        if i == 0 {
                            entry.with_message(*part)
                        } else {
                            entry.with_message(format!("{}{part}", entry.sender))
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Splits multi-line messages into one entry per non-blank line, all sharing
/// the original entry's other fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitMultiline;

impl LogProcessor for SplitMultiline {
    fn process(&self, log: Log) -> Log {
        log.into_iter()
            .flat_map(|entry| {
                let lines: Vec<&str> = entry
                    .message
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .collect();
                if lines.len() <= 1 {
                    return vec![entry];
                }
                lines.iter().map(|line| entry.with_message(*line)).collect()
            })
            .collect()
    }
}

/// Applies a [`ColorConfig`] to the log: resolves each sender, drops
/// disabled speakers, and stamps colors onto the surviving entries.
///
/// Order-sensitive: run after any stage that rewrites senders or derives
/// message text from them.
pub struct ColorProcessor {
    config: ColorConfig,
    auto_assign: bool,
}

impl ColorProcessor {
    /// Strict variant: senders missing from the config render black.
    #[must_use]
    pub fn new(config: ColorConfig) -> Self {
        Self {
            config,
            auto_assign: false,
        }
    }

    /// Variant that first assigns palette colors to any sender the config
    /// has not seen, in order of first appearance.
    #[must_use]
    pub fn with_auto_assign(config: ColorConfig) -> Self {
        Self {
            config,
            auto_assign: true,
        }
    }
}

impl LogProcessor for ColorProcessor {
    fn process(&self, log: Log) -> Log {
        let config = if self.auto_assign {
            let senders: Vec<&str> = log.iter().map(|e| e.sender.as_str()).collect();
            self.config.assign_colors(&senders)
        } else {
            self.config.clone()
        };

        log.into_iter()
            .filter_map(|mut entry| {
                let Some(found) = config.entry_for(&entry.sender) else {
                    entry.color = Some(config.get_color(&entry.sender));
                    return Some(entry);
                };
                if found.disabled {
                    return None;
                }
                entry.color = Some(found.color);
                entry.name_color = found.name_color;
                if found.alias_mode == AliasMode::Standard {
                    entry.sender = found.name.clone();
                }
                Some(entry)
            })
            .collect()
    }
}

/// Which optional stages a pipeline runs. Every toggle defaults to on;
/// disabled stages are omitted from the chain entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ProcessorConfig {
    pub split_multiline: bool,
    pub remove_image: bool,
    pub replace_me: bool,
    pub remove_dice_command: bool,
    pub remove_parentheses: bool,
    pub remove_empty_message: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            split_multiline: true,
            remove_image: true,
            replace_me: true,
            remove_dice_command: true,
            remove_parentheses: true,
            remove_empty_message: true,
        }
    }
}

impl ProcessorConfig {
    /// Builds the enabled stages in canonical order.
    #[must_use]
    pub fn build(&self) -> Vec<Box<dyn LogProcessor>> {
        let mut stages: Vec<Box<dyn LogProcessor>> = Vec::new();
        if self.split_multiline {
            stages.push(Box::new(SplitMultiline));
        }
        if self.remove_image {
            stages.push(Box::new(RemoveImage));
        }
        if self.replace_me {
            stages.push(Box::new(ReplaceMe));
        }
        if self.remove_dice_command {
            stages.push(Box::new(RemoveDiceCommand));
        }
        if self.remove_parentheses {
            stages.push(Box::new(RemoveParentheses));
        }
        if self.remove_empty_message {
            stages.push(Box::new(RemoveEmptyMessage));
        }
        stages
    }
}
