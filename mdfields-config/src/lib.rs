//! Shared configuration loader for the mdfields toolchain.
//!
//! `defaults/mdfields.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`MdfieldsConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdfields::{ExcerptFormat, ExcerptParams, MarkdownOptions, ParseOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdfields.default.toml");

/// Top-level configuration consumed by mdfields applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdfieldsConfig {
    pub excerpt: ExcerptConfig,
    pub markdown: MarkdownConfig,
    pub reading: ReadingConfig,
}

/// Excerpt extraction knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ExcerptConfig {
    /// Separator marker; an empty string disables separator lookup.
    pub separator: String,
    pub prune_length: usize,
    pub truncate: bool,
    pub format: ExcerptFormatConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ExcerptFormatConfig {
    #[serde(rename = "plain")]
    Plain,
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "markdown")]
    Markdown,
}

impl From<ExcerptFormatConfig> for ExcerptFormat {
    fn from(config: ExcerptFormatConfig) -> Self {
        match config {
            ExcerptFormatConfig::Plain => ExcerptFormat::Plain,
            ExcerptFormatConfig::Html => ExcerptFormat::Html,
            ExcerptFormatConfig::Markdown => ExcerptFormat::Markdown,
        }
    }
}

impl From<&ExcerptConfig> for ExcerptParams {
    fn from(config: &ExcerptConfig) -> Self {
        ExcerptParams {
            prune_length: config.prune_length,
            truncate: config.truncate,
            format: config.format.into(),
        }
    }
}

/// Mirrors the CommonMark extension toggles of the parser.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions {
            tables: config.tables,
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            tasklist: config.tasklist,
        }
    }
}

/// Reading-time knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingConfig {
    pub words_per_minute: u32,
}

impl From<&MdfieldsConfig> for ParseOptions {
    fn from(config: &MdfieldsConfig) -> Self {
        let separator = config.excerpt.separator.as_str();
        ParseOptions {
            excerpt_separator: if separator.is_empty() {
                None
            } else {
                Some(separator.to_string())
            },
            markdown: (&config.markdown).into(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdfieldsConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdfieldsConfig, ConfigError> {
    Loader::new().build()
}
