//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use lp_core::{FormatOptions, ProcessorConfig};
use serde::{Deserialize, Serialize};

/// Output representation for the paint command.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// BBCode markup.
    #[default]
    Bbcode,
    /// An HTML fragment.
    Html,
    /// Structured rows as JSON.
    Json,
}

/// Color table serialization format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Line-pair text form.
    #[default]
    Text,
    /// Structured YAML form.
    Yaml,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format when `--format` is not given.
    pub format: OutputFormat,
    /// Which optional pipeline stages run.
    pub processors: ProcessorConfig,
    /// Which entry parts the text formatters emit.
    pub formatter: FormatOptions,
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (LP_*)
        figment = figment.merge(Env::prefixed("LP_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for lp.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("lp"))
}
