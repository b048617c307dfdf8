//! Markdown support: CommonMark parsing and serialization via Comrak.

pub mod parser;
pub mod serializer;

pub use parser::{parse_markdown, parse_markdown_with, MarkdownOptions, ParsedMarkdown};
pub use serializer::{serialize_to_markdown, serialize_to_markdown_with};
