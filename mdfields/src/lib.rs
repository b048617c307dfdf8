//! Derived-field extraction for Markdown documents.
//!
//! Parse a document once, then ask it for the fields you need: rendered
//! HTML, the document tree, excerpts in several formats, headings, word
//! counts and a reading-time estimate.
//!
//! ```no_run
//! use mdfields::{ExcerptParams, MarkdownDocument};
//!
//! let doc = MarkdownDocument::parse("# Hello\n\nWhere oh where is my little pony?\n");
//! let html = doc.html()?;
//! let excerpt = doc.excerpt(&ExcerptParams::default())?;
//! # Ok::<(), mdfields::TransformError>(())
//! ```
//!
//! Markdown parsing and Markdown output go through Comrak; HTML output goes
//! through html5ever. The excerpt pipeline in [`excerpt`] operates on the
//! [`ast::Node`] tree and is format-blind until serialization.

pub mod ast;
pub mod counts;
pub mod document;
pub mod error;
pub mod excerpt;
pub mod formats;
pub mod headings;

pub use ast::Node;
pub use counts::{time_to_read, word_count, WordCount, DEFAULT_WORDS_PER_MINUTE};
pub use document::{MarkdownDocument, ParseOptions};
pub use error::TransformError;
pub use excerpt::{ExcerptFormat, ExcerptParams, DEFAULT_PRUNE_LENGTH, ELLIPSIS};
pub use formats::MarkdownOptions;
pub use headings::Heading;
