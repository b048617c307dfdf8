//! Markdown serialization (document tree → CommonMark)
//!
//! Pipeline: document tree → Comrak AST → Markdown string. Comrak owns
//! escaping and layout; this module only rebuilds its AST shape from the
//! tag/properties/children nodes, so a pruned tree reads back as valid
//! Markdown.

use crate::ast::Node;
use crate::error::TransformError;
use crate::formats::markdown::parser::{comrak_options, MarkdownOptions};
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeHtmlBlock,
    NodeLink, NodeList, NodeTable, NodeValue, TableAlignment,
};
use comrak::{format_commonmark, Arena};
use std::cell::RefCell;

/// Serialize a document tree to Markdown with the default extension set.
pub fn serialize_to_markdown(tree: &Node) -> Result<String, TransformError> {
    serialize_to_markdown_with(tree, &MarkdownOptions::default())
}

/// Serialize a document tree to Markdown with the extension set it was
/// parsed with, so escaping rules match on the way back out.
pub fn serialize_to_markdown_with(
    tree: &Node,
    markdown: &MarkdownOptions,
) -> Result<String, TransformError> {
    let arena = Arena::new();
    let root = make(&arena, NodeValue::Document);
    add_blocks(&arena, root, tree.children());

    let mut output = Vec::new();
    let mut options = comrak_options(markdown);
    // Raw HTML nodes must survive serialization.
    options.render.unsafe_ = true;
    format_commonmark(root, &options, &mut output)
        .map_err(|e| TransformError::SerializationError(format!("Comrak serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| TransformError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

fn make<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

fn list_config(ordered: bool, start: usize) -> NodeList {
    NodeList {
        list_type: if ordered {
            ListType::Ordered
        } else {
            ListType::Bullet
        },
        marker_offset: 0,
        padding: 0,
        start,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight: true,
    }
}

/// True for nodes that live inside a paragraph rather than beside one.
fn is_inline(node: &Node) -> bool {
    match node {
        Node::Text { .. } => true,
        Node::Raw { .. } | Node::Root { .. } => false,
        Node::Element { .. } => matches!(
            node.tag(),
            Some("em" | "strong" | "del" | "sup" | "code" | "a" | "img" | "br")
        ),
    }
}

/// Append a run of block-level children, wrapping any loose inline nodes
/// in a shared paragraph.
fn add_blocks<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, children: &[Node]) {
    let mut paragraph: Option<&'a AstNode<'a>> = None;
    for child in children {
        if is_inline(child) {
            let para = *paragraph.get_or_insert_with(|| {
                let para = make(arena, NodeValue::Paragraph);
                parent.append(para);
                para
            });
            add_inline(arena, para, child);
        } else {
            paragraph = None;
            add_block(arena, parent, child);
        }
    }
}

fn add_block<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Node) {
    let tag = match node {
        Node::Raw { value } => {
            let block = make(
                arena,
                NodeValue::HtmlBlock(NodeHtmlBlock {
                    block_type: 0,
                    literal: value.clone(),
                }),
            );
            parent.append(block);
            return;
        }
        Node::Root { .. } => {
            add_blocks(arena, parent, node.children());
            return;
        }
        Node::Text { .. } => unreachable!("inline nodes are wrapped by add_blocks"),
        Node::Element { tag_name, .. } => tag_name.as_str(),
    };

    match tag {
        "p" => {
            let para = make(arena, NodeValue::Paragraph);
            parent.append(para);
            for child in node.children() {
                add_inline(arena, para, child);
            }
        }

        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag.as_bytes()[1] - b'0';
            let heading = make(
                arena,
                NodeValue::Heading(NodeHeading {
                    level,
                    setext: false,
                }),
            );
            parent.append(heading);
            for child in node.children() {
                add_inline(arena, heading, child);
            }
        }

        "blockquote" => {
            let quote = make(arena, NodeValue::BlockQuote);
            parent.append(quote);
            add_blocks(arena, quote, node.children());
        }

        "ul" | "ol" => {
            let ordered = tag == "ol";
            let start = node
                .property("start")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1);
            let list = make(arena, NodeValue::List(list_config(ordered, start)));
            parent.append(list);
            for child in node.children() {
                let item = make(arena, NodeValue::Item(list_config(ordered, start)));
                list.append(item);
                add_blocks(arena, item, child.children());
            }
        }

        "pre" => {
            parent.append(make(arena, NodeValue::CodeBlock(code_block_from(node))));
        }

        "hr" => {
            parent.append(make(arena, NodeValue::ThematicBreak));
        }

        "table" => add_table(arena, parent, node),

        // Unknown container, serialize its children in place.
        _ => add_blocks(arena, parent, node.children()),
    }
}

fn add_inline<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Node) {
    match node {
        Node::Text { value } => {
            parent.append(make(arena, NodeValue::Text(value.replace('\n', " "))));
        }
        Node::Raw { value } => {
            parent.append(make(arena, NodeValue::HtmlInline(value.clone())));
        }
        Node::Root { .. } => {
            for child in node.children() {
                add_inline(arena, parent, child);
            }
        }
        Node::Element { tag_name, .. } => match tag_name.as_str() {
            "em" => wrap_inline(arena, parent, NodeValue::Emph, node),
            "strong" => wrap_inline(arena, parent, NodeValue::Strong, node),
            "del" => wrap_inline(arena, parent, NodeValue::Strikethrough, node),
            "sup" => wrap_inline(arena, parent, NodeValue::Superscript, node),

            "code" => {
                parent.append(make(
                    arena,
                    NodeValue::Code(NodeCode {
                        num_backticks: 1,
                        literal: text_content(node),
                    }),
                ));
            }

            "a" => {
                let link = make(
                    arena,
                    NodeValue::Link(NodeLink {
                        url: node.property("href").unwrap_or_default().to_string(),
                        title: node.property("title").unwrap_or_default().to_string(),
                    }),
                );
                parent.append(link);
                for child in node.children() {
                    add_inline(arena, link, child);
                }
            }

            "img" => {
                let image = make(
                    arena,
                    NodeValue::Image(NodeLink {
                        url: node.property("src").unwrap_or_default().to_string(),
                        title: node.property("title").unwrap_or_default().to_string(),
                    }),
                );
                parent.append(image);
                let alt = node.property("alt").unwrap_or_default().to_string();
                image.append(make(arena, NodeValue::Text(alt)));
            }

            "br" => {
                parent.append(make(arena, NodeValue::LineBreak));
            }

            _ => {
                for child in node.children() {
                    add_inline(arena, parent, child);
                }
            }
        },
    }
}

fn wrap_inline<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    value: NodeValue,
    node: &Node,
) {
    let wrapper = make(arena, value);
    parent.append(wrapper);
    for child in node.children() {
        add_inline(arena, wrapper, child);
    }
}

/// Concatenated text content of a subtree.
fn text_content(node: &Node) -> String {
    match node {
        Node::Text { value } => value.clone(),
        Node::Raw { .. } => String::new(),
        _ => node.children().iter().map(text_content).collect(),
    }
}

/// Rebuild a fenced code block from `<pre><code class="language-X"
/// data-meta="...">`, restoring the original info string.
fn code_block_from(node: &Node) -> NodeCodeBlock {
    let code = node
        .children()
        .iter()
        .find(|child| child.tag() == Some("code"));

    let (info, literal) = match code {
        Some(code) => {
            let mut info = code
                .property("class")
                .and_then(|class| class.strip_prefix("language-"))
                .unwrap_or_default()
                .to_string();
            if let Some(meta) = code.property("data-meta") {
                if !info.is_empty() {
                    info.push(' ');
                }
                info.push_str(meta);
            }
            (info, text_content(code))
        }
        None => (String::new(), text_content(node)),
    };

    NodeCodeBlock {
        fenced: true,
        fence_char: b'`',
        fence_length: 3,
        fence_offset: 0,
        info,
        literal,
    }
}

fn add_table<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Node) {
    let rows: Vec<&Node> = node
        .children()
        .iter()
        .flat_map(|section| section.children())
        .filter(|row| row.tag() == Some("tr"))
        .collect();

    let alignments = rows
        .first()
        .map(|row| {
            row.children()
                .iter()
                .map(|cell| match cell.property("align") {
                    Some("left") => TableAlignment::Left,
                    Some("center") => TableAlignment::Center,
                    Some("right") => TableAlignment::Right,
                    _ => TableAlignment::None,
                })
                .collect()
        })
        .unwrap_or_default();

    let num_columns = rows.first().map(|row| row.children().len()).unwrap_or(0);
    let table = make(
        arena,
        NodeValue::Table(NodeTable {
            alignments,
            num_columns,
            num_rows: rows.len(),
            num_nonempty_cells: 0,
        }),
    );
    parent.append(table);

    for row in rows {
        let header = row
            .children()
            .first()
            .is_some_and(|cell| cell.tag() == Some("th"));
        let tr = make(arena, NodeValue::TableRow(header));
        table.append(tr);
        for cell in row.children() {
            let td = make(arena, NodeValue::TableCell);
            tr.append(td);
            for child in cell.children() {
                add_inline(arena, td, child);
            }
        }
    }
}
