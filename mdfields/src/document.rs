//! The parsed document and its derived fields.
//!
//! `MarkdownDocument` owns the raw source and the body tree; every field
//! accessor computes from those on demand. Nothing is cached, so accessors
//! can be called in any order and any number of times.

use crate::ast::Node;
use crate::counts::{self, WordCount};
use crate::error::TransformError;
use crate::excerpt::{
    locate_head, prune_str, prune_tree, to_plain_text, ExcerptFormat, ExcerptParams,
};
use crate::formats::{
    parse_markdown_with, serialize_to_html, serialize_to_markdown_with, MarkdownOptions,
};
use crate::headings::{self, Heading};

/// Options applied at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Marker splitting the excerpt head from the rest of the document.
    pub excerpt_separator: Option<String>,
    /// CommonMark extension toggles.
    pub markdown: MarkdownOptions,
}

/// A parsed Markdown document.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    source: String,
    tree: Node,
    frontmatter: Option<String>,
    separator: Option<String>,
    markdown: MarkdownOptions,
}

impl MarkdownDocument {
    /// Parse a document with default options.
    pub fn parse(source: &str) -> MarkdownDocument {
        MarkdownDocument::parse_with(source, &ParseOptions::default())
    }

    /// Parse a document.
    pub fn parse_with(source: &str, options: &ParseOptions) -> MarkdownDocument {
        let parsed = parse_markdown_with(source, &options.markdown);
        MarkdownDocument {
            source: source.to_string(),
            tree: parsed.tree,
            frontmatter: parsed.frontmatter,
            separator: options.excerpt_separator.clone(),
            markdown: options.markdown.clone(),
        }
    }

    /// The raw Markdown source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The body tree. Frontmatter is not part of it.
    pub fn html_ast(&self) -> &Node {
        &self.tree
    }

    /// The document rendered as an HTML fragment.
    pub fn html(&self) -> Result<String, TransformError> {
        serialize_to_html(&self.tree)
    }

    /// The excerpt in the requested format.
    ///
    /// When an excerpt separator was configured and occurs in the source,
    /// the head before it is returned whole; otherwise the document is
    /// pruned to `params.prune_length` characters.
    pub fn excerpt(&self, params: &ExcerptParams) -> Result<String, TransformError> {
        if let Some(head) = self.separator_head() {
            return match params.format {
                ExcerptFormat::Plain => Ok(to_plain_text(&head)),
                ExcerptFormat::Html => serialize_to_html(&head),
                ExcerptFormat::Markdown => serialize_to_markdown_with(&head, &self.markdown),
            };
        }

        match params.format {
            ExcerptFormat::Plain => Ok(prune_str(
                &to_plain_text(&self.tree),
                params.prune_length,
                params.truncate,
            )),
            ExcerptFormat::Html => {
                serialize_to_html(&prune_tree(&self.tree, params.prune_length, params.truncate))
            }
            ExcerptFormat::Markdown => serialize_to_markdown_with(
                &prune_tree(&self.tree, params.prune_length, params.truncate),
                &self.markdown,
            ),
        }
    }

    /// The excerpt as a tree, pruned with the same budget rules as the
    /// textual formats. Unpruned when the separator applies.
    pub fn excerpt_ast(&self, prune_length: usize, truncate: bool) -> Node {
        match self.separator_head() {
            Some(head) => head,
            None => prune_tree(&self.tree, prune_length, truncate),
        }
    }

    /// The document's headings, optionally filtered by depth.
    pub fn headings(&self, max_depth: Option<u8>) -> Vec<Heading> {
        headings::headings(&self.tree, max_depth)
    }

    /// Word, sentence and paragraph totals.
    pub fn word_count(&self) -> WordCount {
        counts::word_count(&self.tree)
    }

    /// Estimated reading time in whole minutes.
    pub fn time_to_read(&self, words_per_minute: u32) -> u32 {
        counts::time_to_read(self.word_count().words, words_per_minute)
    }

    /// Raw YAML frontmatter, delimiters stripped.
    pub fn frontmatter(&self) -> Option<&str> {
        self.frontmatter.as_deref()
    }

    /// Frontmatter parsed as YAML.
    pub fn frontmatter_value(&self) -> Result<Option<serde_yaml::Value>, TransformError> {
        match &self.frontmatter {
            Some(yaml) => serde_yaml::from_str(yaml)
                .map(Some)
                .map_err(|e| TransformError::ParseError(format!("Invalid frontmatter: {e}"))),
            None => Ok(None),
        }
    }

    /// Parse the head before the separator, when one is configured and
    /// present in the raw source.
    fn separator_head(&self) -> Option<Node> {
        locate_head(&self.source, self.separator.as_deref())
            .map(|head| parse_markdown_with(head, &self.markdown).tree)
    }
}
