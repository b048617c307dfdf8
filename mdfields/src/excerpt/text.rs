//! Plain-text flattening of a document tree.
//!
//! Produces the human-readable text of a document: inline markup is
//! dropped, block boundaries become single spaces, image alt text is kept,
//! raw embedded HTML contributes nothing, and all whitespace collapses.

use crate::ast::Node;

/// Tags whose boundaries separate words in the flattened text.
const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "blockquote", "pre", "table",
    "thead", "tbody", "tr", "th", "td", "hr", "div", "section",
];

fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Flatten a document tree into a single line of plain text.
pub fn to_plain_text(tree: &Node) -> String {
    let mut buffer = String::new();
    collect(tree, &mut buffer);
    buffer.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect(node: &Node, buffer: &mut String) {
    match node {
        Node::Text { value } => buffer.push_str(value),
        Node::Raw { .. } => {}
        Node::Root { children } => {
            for child in children {
                collect(child, buffer);
            }
        }
        Node::Element {
            tag_name, children, ..
        } => {
            let block = is_block(tag_name);
            if block || tag_name == "br" {
                buffer.push(' ');
            }
            if tag_name == "img" {
                if let Some(alt) = node.property("alt") {
                    buffer.push_str(alt);
                }
            }
            for child in children {
                collect(child, buffer);
            }
            if block {
                buffer.push(' ');
            }
        }
    }
}
