//! Per-speaker color table with aliases and deterministic auto-assignment.
//!
//! [`ColorConfig`] is a value type: every mutation returns a new config and
//! leaves the original untouched. Canonical names are unique and every alias
//! resolves to exactly one canonical name; mutations that would break that
//! invariant are rejected with a warning and the original config is returned.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{DEFAULT_PALETTE, Rgb, delta_e};

/// Minimum perceptual distance (CIE76) required between an auto-assigned
/// color and every color already in use.
pub const MIN_DIFF: f64 = 20.0;

/// Errors from the structured color-table serialization.
#[derive(Debug, Error)]
pub enum ColorTableError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// How a speaker's display name is rendered once their alias resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasMode {
    /// Rewrite the sender to the canonical name.
    #[default]
    Standard,
    /// Keep the original (possibly aliased) sender text.
    PreserveAlias,
}

impl AliasMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::PreserveAlias => "preserve_alias",
        }
    }

    const fn is_standard(&self) -> bool {
        matches!(self, Self::Standard)
    }
}

impl std::fmt::Display for AliasMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AliasMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "preserve_alias" => Ok(Self::PreserveAlias),
            _ => Err(format!("invalid alias mode: {s}")),
        }
    }
}

/// One speaker in the color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    /// Canonical name, unique within a config.
    pub name: String,
    /// Message color.
    pub color: Rgb,
    /// Optional override for the sender marker.
    pub name_color: Option<Rgb>,
    /// Alternate spellings resolving to this entry, in first-seen order.
    pub aliases: Vec<String>,
    /// Disabled speakers have their messages dropped from output.
    pub disabled: bool,
    /// Display policy for aliased senders.
    pub alias_mode: AliasMode,
}

impl ColorEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
            name_color: None,
            aliases: Vec::new(),
            disabled: false,
            alias_mode: AliasMode::Standard,
        }
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

/// Serialized record for the structured (YAML) table format. Lenient on the
/// way in: a bad color spec becomes black with a warning, never an error.
#[derive(Debug, Serialize, Deserialize)]
struct ColorRecord {
    name: String,
    color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name_color: Option<String>,
    #[serde(default, skip_serializing_if = "AliasMode::is_standard")]
    alias_mode: AliasMode,
}

/// Parses a color spec, falling back to black with a warning.
fn lenient_color(spec: &str) -> Rgb {
    spec.parse().unwrap_or_else(|err| {
        tracing::warn!(%err, "unparseable color spec, substituting black");
        Rgb::BLACK
    })
}

/// An immutable name→color table with alias resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorConfig {
    entries: Vec<ColorEntry>,
}

impl ColorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A config holding a single entry, the `CreateColorConfig` shape.
    #[must_use]
    pub fn single(name: impl Into<String>, color: Rgb, aliases: &[&str]) -> Self {
        let name = name.into();
        let mut entry = ColorEntry::new(name.clone(), color);
        for alias in aliases {
            if *alias != name && !entry.aliases.iter().any(|a| a == alias) {
                entry.aliases.push((*alias).to_string());
            }
        }
        Self {
            entries: vec![entry],
        }
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    /// Canonical form of a name. Unknown names are their own standard form,
    /// which lets color lookups register names lazily.
    #[must_use]
    pub fn standard_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|e| e.answers_to(name))
            .map_or(name, |e| e.name.as_str())
    }

    /// The entry a name or alias resolves to, if any.
    #[must_use]
    pub fn entry_for(&self, name: &str) -> Option<&ColorEntry> {
        self.entries.iter().find(|e| e.answers_to(name))
    }

    /// Whether the name (after alias resolution) has an assigned color.
    #[must_use]
    pub fn has_color(&self, name: &str) -> bool {
        self.entry_for(name).is_some()
    }

    /// Color for a name, black when unassigned.
    #[must_use]
    pub fn get_color(&self, name: &str) -> Rgb {
        self.entry_for(name).map_or(Rgb::BLACK, |e| e.color)
    }

    /// Every assigned color, in entry order.
    #[must_use]
    pub fn used_colors(&self) -> Vec<Rgb> {
        self.entries.iter().map(|e| e.color).collect()
    }

    fn with_entry_updated(&self, name: &str, update: impl FnOnce(&mut ColorEntry)) -> Self {
        let canonical = self.standard_name(name).to_string();
        let mut next = self.clone();
        if let Some(entry) = next.entries.iter_mut().find(|e| e.name == canonical) {
            update(entry);
        } else {
            let mut entry = ColorEntry::new(canonical, Rgb::BLACK);
            update(&mut entry);
            next.entries.push(entry);
        }
        next
    }

    /// Sets (or assigns) a color, resolving aliases first.
    #[must_use]
    pub fn set_color(&self, name: &str, color: Rgb) -> Self {
        self.with_entry_updated(name, |e| e.color = color)
    }

    /// Sets or clears the sender-marker override color.
    #[must_use]
    pub fn set_name_color(&self, name: &str, color: Option<Rgb>) -> Self {
        self.with_entry_updated(name, |e| e.name_color = color)
    }

    /// Marks a speaker's messages for exclusion from output.
    #[must_use]
    pub fn set_disabled(&self, name: &str, disabled: bool) -> Self {
        self.with_entry_updated(name, |e| e.disabled = disabled)
    }

    #[must_use]
    pub fn set_alias_mode(&self, name: &str, mode: AliasMode) -> Self {
        self.with_entry_updated(name, |e| e.alias_mode = mode)
    }

    /// Renames a canonical entry. Rejected (returning the original config)
    /// when the new name already belongs to another entry.
    #[must_use]
    pub fn rename(&self, old: &str, new: &str) -> Self {
        if old == new {
            return self.clone();
        }
        if self.entries.iter().any(|e| e.answers_to(new)) {
            tracing::warn!(old, new, "rename rejected: name already in use");
            return self.clone();
        }
        let mut next = self.clone();
        if let Some(entry) = next.entries.iter_mut().find(|e| e.name == old) {
            entry.name = new.to_string();
        } else {
            tracing::warn!(old, "rename rejected: no such entry");
        }
        next
    }

    /// Replaces an entry's alias list. Rejected when any alias already
    /// belongs to a different entry.
    #[must_use]
    pub fn set_aliases(&self, name: &str, aliases: &[&str]) -> Self {
        let canonical = self.standard_name(name).to_string();
        let conflict = aliases.iter().copied().find(|alias| {
            self.entries
                .iter()
                .any(|e| e.name != canonical && e.answers_to(alias))
        });
        if let Some(alias) = conflict {
            tracing::warn!(alias, "alias update rejected: already bound to another entry");
            return self.clone();
        }
        self.with_entry_updated(&canonical, |e| {
            e.aliases.clear();
            for alias in aliases {
                if *alias != e.name && !e.aliases.iter().any(|a| a == alias) {
                    e.aliases.push((*alias).to_string());
                }
            }
        })
    }

    /// Combines two configs. For names present in both, the incoming side
    /// wins color, overrides, and modes; alias lists are unioned keeping
    /// base order first. Incoming aliases are stripped from any other base
    /// entry so each alias still resolves to exactly one name.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut entries = self.entries.clone();
        for incoming in &other.entries {
            // Incoming claims its aliases: detach them from unrelated entries.
            for entry in &mut entries {
                if entry.name != incoming.name {
                    entry
                        .aliases
                        .retain(|a| a != &incoming.name && !incoming.answers_to(a));
                }
            }
            if let Some(base) = entries.iter_mut().find(|e| e.name == incoming.name) {
                base.color = incoming.color;
                base.name_color = incoming.name_color;
                base.disabled = incoming.disabled;
                base.alias_mode = incoming.alias_mode;
                for alias in &incoming.aliases {
                    if !base.aliases.contains(alias) {
                        base.aliases.push(alias.clone());
                    }
                }
            } else {
                entries.push(incoming.clone());
            }
        }
        Self { entries }
    }

    /// Assigns palette colors to every name that does not already have one,
    /// in the given order.
    ///
    /// The first assignment overall takes the first palette color
    /// unconditionally. Every later one takes the first palette color whose
    /// CIE76 distance to every used color exceeds [`MIN_DIFF`], falling back
    /// to black once the palette is exhausted. Greedy and order-dependent by
    /// design: deterministic for a given input order.
    #[must_use]
    pub fn assign_colors<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let mut next = self.clone();
        for name in names {
            let name = name.as_ref();
            if next.has_color(name) {
                continue;
            }

            let used = next.used_colors();
            let color = if used.is_empty() {
                DEFAULT_PALETTE[0]
            } else {
                DEFAULT_PALETTE
                    .iter()
                    .copied()
                    .find(|candidate| used.iter().all(|u| delta_e(*u, *candidate) > MIN_DIFF))
                    .unwrap_or(Rgb::BLACK)
            };
            next = next.merge(&Self::single(name, color, &[]));
        }
        next
    }

    /// Renders the line-pair text form: `name colorspec` then a `$`-joined
    /// alias list (blank when none).
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.name);
            out.push(' ');
            out.push_str(&entry.color.hex());
            out.push('\n');
            out.push_str(&entry.aliases.join("$"));
            out.push('\n');
        }
        out
    }

    /// Parses the line-pair text form. Blank lines between entries are
    /// skipped, so a stray blank only costs that spot, not the rest of the
    /// file. A trailing header with no alias line is an entry with no
    /// aliases; unparseable colors become black with a warning.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut config = Self::new();
        let mut lines = text.lines();
        while let Some(head) = lines.find(|line| !line.trim().is_empty()) {
            let head = head.trim();
            let (name, color) = match head.rsplit_once(char::is_whitespace) {
                Some((name, spec)) => (name.trim(), lenient_color(spec)),
                None => {
                    tracing::warn!(line = head, "color table line without a color spec");
                    (head, Rgb::BLACK)
                }
            };
            let aliases: Vec<&str> = lines
                .next()
                .map(|l| l.split('$').map(str::trim).filter(|a| !a.is_empty()).collect())
                .unwrap_or_default();
            config = config.merge(&Self::single(name, color, &aliases));
        }
        config
    }

    /// Renders the structured YAML form, which also carries the disabled
    /// flag, name-color override, and alias mode.
    pub fn to_yaml(&self) -> Result<String, ColorTableError> {
        let records: Vec<ColorRecord> = self
            .entries
            .iter()
            .map(|e| ColorRecord {
                name: e.name.clone(),
                color: e.color.hex(),
                aliases: e.aliases.clone(),
                disabled: e.disabled,
                name_color: e.name_color.map(|c| c.hex()),
                alias_mode: e.alias_mode,
            })
            .collect();
        Ok(serde_yaml::to_string(&records)?)
    }

    /// Parses the structured YAML form.
    pub fn from_yaml(text: &str) -> Result<Self, ColorTableError> {
        let records: Vec<ColorRecord> = serde_yaml::from_str(text)?;
        let mut config = Self::new();
        for record in records {
            let aliases: Vec<&str> = record.aliases.iter().map(String::as_str).collect();
            let mut single = Self::single(&record.name, lenient_color(&record.color), &aliases);
            if let Some(entry) = single.entries.first_mut() {
                entry.disabled = record.disabled;
                entry.name_color = record.name_color.as_deref().map(lenient_color);
                entry.alias_mode = record.alias_mode;
            }
            config = config.merge(&single);
        }
        Ok(config)
    }
}
