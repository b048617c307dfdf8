//! Excerpt extraction.
//!
//! An excerpt is the leading slice of a document, either everything before
//! an explicit separator comment or the first `prune_length` characters of
//! content. It can be rendered as plain text, HTML or Markdown; the
//! pruning rule is the same in every format.

mod prune;
mod separator;
mod text;
mod tree;

pub use prune::prune_str;
pub use separator::locate_head;
pub use text::to_plain_text;
pub use tree::prune_tree;

use crate::error::TransformError;
use std::str::FromStr;

/// Appended wherever pruning removed content.
pub const ELLIPSIS: char = '\u{2026}';

/// Default excerpt length in characters.
pub const DEFAULT_PRUNE_LENGTH: usize = 140;

/// Output format of an excerpt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExcerptFormat {
    #[default]
    Plain,
    Html,
    Markdown,
}

impl ExcerptFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExcerptFormat::Plain => "plain",
            ExcerptFormat::Html => "html",
            ExcerptFormat::Markdown => "markdown",
        }
    }
}

impl FromStr for ExcerptFormat {
    type Err = TransformError;

    fn from_str(name: &str) -> Result<ExcerptFormat, TransformError> {
        match name {
            "plain" => Ok(ExcerptFormat::Plain),
            "html" => Ok(ExcerptFormat::Html),
            "markdown" => Ok(ExcerptFormat::Markdown),
            other => Err(TransformError::UnknownFormat(other.to_string())),
        }
    }
}

/// Parameters of an excerpt request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcerptParams {
    /// Character budget for pruning.
    pub prune_length: usize,
    /// Cut exactly at the limit instead of at a word boundary.
    pub truncate: bool,
    /// Output format.
    pub format: ExcerptFormat,
}

impl Default for ExcerptParams {
    fn default() -> ExcerptParams {
        ExcerptParams {
            prune_length: DEFAULT_PRUNE_LENGTH,
            truncate: false,
            format: ExcerptFormat::Plain,
        }
    }
}
