//! Markdown parsing (CommonMark → document tree)
//!
//! Pipeline: Markdown string → Comrak AST → document tree.
//! Comrak owns the grammar; this module only maps its AST onto the
//! tag/properties/children node shape the rest of the crate works with.

use crate::ast::Node;
use comrak::nodes::{AstNode, ListType, NodeCodeBlock, NodeTable, NodeValue, TableAlignment};
use comrak::{parse_document, Arena, ComrakOptions};
use std::borrow::Cow;

/// Result of parsing a Markdown source: the body tree plus any leading
/// YAML frontmatter (delimiters stripped), which is not part of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMarkdown {
    pub tree: Node,
    pub frontmatter: Option<String>,
}

/// Which CommonMark extensions the parser recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl Default for MarkdownOptions {
    fn default() -> MarkdownOptions {
        MarkdownOptions {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
        }
    }
}

/// Parse a Markdown string into a document tree with default extensions.
pub fn parse_markdown(source: &str) -> ParsedMarkdown {
    parse_markdown_with(source, &MarkdownOptions::default())
}

/// Parse a Markdown string into a document tree.
pub fn parse_markdown_with(source: &str, markdown: &MarkdownOptions) -> ParsedMarkdown {
    // comrak only closes a frontmatter fence on a newline-terminated line;
    // a document ending exactly at the closing delimiter needs one added.
    let source: Cow<'_, str> = if source.is_empty() || source.ends_with('\n') {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(format!("{source}\n"))
    };

    let arena = Arena::new();
    let options = comrak_options(markdown);
    let root = parse_document(&arena, &source, &options);

    let mut frontmatter = None;
    let mut children = Vec::new();
    for child in root.children() {
        collect_block(child, &mut children, &mut frontmatter);
    }

    ParsedMarkdown {
        tree: Node::root(children),
        frontmatter,
    }
}

/// Comrak options shared by the parser and the Markdown serializer, so a
/// pruned tree serializes with the same extension set it was parsed with.
pub(crate) fn comrak_options(markdown: &MarkdownOptions) -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = markdown.tables;
    options.extension.strikethrough = markdown.strikethrough;
    options.extension.autolink = markdown.autolink;
    options.extension.tasklist = markdown.tasklist;
    options.extension.superscript = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    options
}

/// Convert a block-level Comrak node, appending the result to `out`.
fn collect_block<'a>(
    node: &'a AstNode<'a>,
    out: &mut Vec<Node>,
    frontmatter: &mut Option<String>,
) {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::FrontMatter(content) => {
            let yaml = content
                .trim()
                .trim_start_matches("---")
                .trim_end_matches("---")
                .trim();
            *frontmatter = Some(yaml.to_string());
        }

        NodeValue::Paragraph => {
            let mut children = Vec::new();
            for child in node.children() {
                collect_inline(child, &mut children);
            }
            out.push(Node::element("p", vec![], children));
        }

        NodeValue::Heading(heading) => {
            let tag = format!("h{}", heading.level.min(6));
            let mut children = Vec::new();
            for child in node.children() {
                collect_inline(child, &mut children);
            }
            out.push(Node::element(&tag, vec![], children));
        }

        NodeValue::BlockQuote => {
            let mut children = Vec::new();
            for child in node.children() {
                collect_block(child, &mut children, frontmatter);
            }
            out.push(Node::element("blockquote", vec![], children));
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let tag = if ordered { "ol" } else { "ul" };
            let start = list.start.to_string();
            let mut attrs = vec![];
            if ordered && list.start != 1 {
                attrs.push(("start", start.as_str()));
            }
            let mut children = Vec::new();
            for child in node.children() {
                collect_block(child, &mut children, frontmatter);
            }
            out.push(Node::element(tag, attrs, children));
        }

        NodeValue::Item(_) | NodeValue::TaskItem(_) => {
            let mut children = Vec::new();
            for child in node.children() {
                collect_block(child, &mut children, frontmatter);
            }
            out.push(Node::element("li", vec![], children));
        }

        NodeValue::CodeBlock(code_block) => {
            out.push(build_code_block(code_block));
        }

        NodeValue::HtmlBlock(html) => {
            out.push(Node::raw(html.literal.trim_end().to_string()));
        }

        NodeValue::ThematicBreak => {
            out.push(Node::element("hr", vec![], vec![]));
        }

        NodeValue::Table(table) => {
            out.push(build_table(node, table));
        }

        // Inline content at block position (e.g. loose text inside an item)
        // falls through to the inline converter.
        _ => collect_inline_from_block(node, out),
    }
}

fn collect_inline_from_block<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
    collect_inline(node, out);
}

/// Convert an inline-level Comrak node, appending the result to `out`.
fn collect_inline<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Text(text) => out.push(Node::text(text.clone())),

        NodeValue::SoftBreak => out.push(Node::text("\n")),

        NodeValue::LineBreak => out.push(Node::element("br", vec![], vec![])),

        NodeValue::Emph => out.push(wrap_inline("em", node)),
        NodeValue::Strong => out.push(wrap_inline("strong", node)),
        NodeValue::Strikethrough => out.push(wrap_inline("del", node)),
        NodeValue::Superscript => out.push(wrap_inline("sup", node)),

        NodeValue::Code(code) => {
            out.push(Node::element(
                "code",
                vec![],
                vec![Node::text(code.literal.clone())],
            ));
        }

        NodeValue::Link(link) => {
            let mut attrs = vec![("href", link.url.as_str())];
            if !link.title.is_empty() {
                attrs.push(("title", link.title.as_str()));
            }
            let mut children = Vec::new();
            for child in node.children() {
                collect_inline(child, &mut children);
            }
            out.push(Node::element("a", attrs, children));
        }

        NodeValue::Image(link) => {
            let alt = flatten_text(node);
            let mut attrs = vec![("src", link.url.as_str()), ("alt", alt.as_str())];
            if !link.title.is_empty() {
                attrs.push(("title", link.title.as_str()));
            }
            out.push(Node::element("img", attrs, vec![]));
        }

        NodeValue::HtmlInline(html) => out.push(Node::raw(html.clone())),

        _ => {
            // Unknown inline wrapper, keep its content.
            for child in node.children() {
                collect_inline(child, out);
            }
        }
    }
}

/// Wrap a node's inline children in a new element.
fn wrap_inline<'a>(tag: &str, node: &'a AstNode<'a>) -> Node {
    let mut children = Vec::new();
    for child in node.children() {
        collect_inline(child, &mut children);
    }
    Node::element(tag, vec![], children)
}

/// Collect plain text content from a node (used for image alt text).
fn flatten_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut output = String::new();
    collect_text_content(node, &mut output);
    output
}

fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}

/// Fenced code blocks become `<pre><code class="language-X">`. Any words in
/// the info string after the language land in `data-meta`.
fn build_code_block(code_block: &NodeCodeBlock) -> Node {
    let info = code_block.info.trim();
    let mut attrs: Vec<(&str, &str)> = vec![];

    let (lang_class, meta);
    if info.is_empty() {
        lang_class = String::new();
        meta = "";
    } else {
        let (lang, rest) = match info.split_once(char::is_whitespace) {
            Some((lang, rest)) => (lang, rest.trim()),
            None => (info, ""),
        };
        lang_class = format!("language-{lang}");
        meta = rest;
    }

    if !lang_class.is_empty() {
        attrs.push(("class", lang_class.as_str()));
    }
    if !meta.is_empty() {
        attrs.push(("data-meta", meta));
    }

    let code = Node::element("code", attrs, vec![Node::text(code_block.literal.clone())]);
    Node::element("pre", vec![], vec![code])
}

/// Tables split into a `<thead>` with `<th>` cells (header rows) and a
/// `<tbody>` with `<td>` cells, each cell carrying its column alignment.
fn build_table<'a>(node: &'a AstNode<'a>, table: &NodeTable) -> Node {
    let mut head_rows = Vec::new();
    let mut body_rows = Vec::new();

    for row in node.children() {
        let header = match &row.data.borrow().value {
            NodeValue::TableRow(header) => *header,
            _ => continue,
        };
        let cell_tag = if header { "th" } else { "td" };

        let mut cells = Vec::new();
        for (index, cell) in row.children().enumerate() {
            let mut children = Vec::new();
            for child in cell.children() {
                collect_inline(child, &mut children);
            }
            let mut attrs = vec![];
            if let Some(align) = alignment_name(table.alignments.get(index)) {
                attrs.push(("align", align));
            }
            cells.push(Node::element(cell_tag, attrs, children));
        }

        let tr = Node::element("tr", vec![], cells);
        if header {
            head_rows.push(tr);
        } else {
            body_rows.push(tr);
        }
    }

    let mut sections = Vec::new();
    if !head_rows.is_empty() {
        sections.push(Node::element("thead", vec![], head_rows));
    }
    if !body_rows.is_empty() {
        sections.push(Node::element("tbody", vec![], body_rows));
    }
    Node::element("table", vec![], sections)
}

fn alignment_name(alignment: Option<&TableAlignment>) -> Option<&'static str> {
    match alignment {
        Some(TableAlignment::Left) => Some("left"),
        Some(TableAlignment::Center) => Some("center"),
        Some(TableAlignment::Right) => Some("right"),
        _ => None,
    }
}
