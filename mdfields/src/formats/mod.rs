//! Format support: the Markdown parser and the per-format serializers.

pub mod html;
pub mod markdown;

pub use html::serialize_to_html;
pub use markdown::{
    parse_markdown, parse_markdown_with, serialize_to_markdown, serialize_to_markdown_with,
    MarkdownOptions, ParsedMarkdown,
};
