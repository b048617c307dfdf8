//! Format-aware tree pruning.
//!
//! Walks a document tree with a running character budget, keeping nodes
//! until the budget runs out. The text node that crosses the limit is cut
//! with the same word-safe or hard rule as plain-text pruning, everything
//! after it is dropped, and a single ellipsis is appended to the last
//! surviving text node. Trees already within budget come back unchanged.

use super::prune::word_safe_end;
use super::ELLIPSIS;
use crate::ast::Node;

/// Prune a tree down to `max_len` characters of text content.
///
/// Only text node values count toward the budget. Elements, raw HTML and
/// image alt text are free, but any of them positioned after the cut are
/// dropped along with the rest of the document.
pub fn prune_tree(tree: &Node, max_len: usize, truncate: bool) -> Node {
    if text_len(tree) <= max_len {
        return tree.clone();
    }

    let mut pruner = Pruner {
        remaining: max_len,
        truncated: false,
        hard: truncate,
    };
    let mut children = Vec::new();
    for child in tree.children() {
        if pruner.truncated {
            break;
        }
        if let Some(pruned) = pruner.prune_node(child) {
            children.push(pruned);
        }
    }

    let mut result = Node::root(children);
    if pruner.truncated && max_len > 0 {
        append_ellipsis(&mut result);
    }
    result
}

/// Total character count of all text nodes in a tree.
fn text_len(node: &Node) -> usize {
    match node {
        Node::Text { value } => value.chars().count(),
        Node::Raw { .. } => 0,
        _ => node.children().iter().map(text_len).sum(),
    }
}

struct Pruner {
    remaining: usize,
    truncated: bool,
    hard: bool,
}

impl Pruner {
    fn prune_node(&mut self, node: &Node) -> Option<Node> {
        match node {
            Node::Text { value } => self.prune_text(value),
            Node::Raw { .. } => Some(node.clone()),
            Node::Root { .. } | Node::Element { .. } => {
                let had_children = !node.children().is_empty();
                let mut children = Vec::new();
                for child in node.children() {
                    if self.truncated {
                        break;
                    }
                    if let Some(pruned) = self.prune_node(child) {
                        children.push(pruned);
                    }
                }
                // A container hollowed out by the cut is dropped entirely.
                if self.truncated && children.is_empty() && had_children {
                    return None;
                }
                Some(rebuild(node, children))
            }
        }
    }

    fn prune_text(&mut self, value: &str) -> Option<Node> {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() <= self.remaining {
            self.remaining -= chars.len();
            return Some(Node::text(value));
        }

        self.truncated = true;
        if self.remaining == 0 {
            return None;
        }
        let keep = if self.hard {
            // Leave room for the ellipsis inside the budget.
            self.remaining - 1
        } else {
            word_safe_end(&chars[..self.remaining + 1], self.remaining)
        };
        self.remaining = 0;
        if keep == 0 {
            return None;
        }
        Some(Node::text(chars[..keep].iter().collect::<String>()))
    }
}

/// Copy a container node with replacement children.
fn rebuild(node: &Node, children: Vec<Node>) -> Node {
    match node {
        Node::Element {
            tag_name,
            properties,
            ..
        } => Node::Element {
            tag_name: tag_name.clone(),
            properties: properties.clone(),
            children,
        },
        _ => Node::root(children),
    }
}

/// Append the ellipsis to the last text node of the tree, or add one at
/// the root when the cut left no text behind.
fn append_ellipsis(tree: &mut Node) {
    if !push_to_last_text(tree) {
        if let Node::Root { children } = tree {
            children.push(Node::text(ELLIPSIS.to_string()));
        }
    }
}

fn push_to_last_text(node: &mut Node) -> bool {
    match node {
        Node::Text { value } => {
            value.push(ELLIPSIS);
            true
        }
        Node::Raw { .. } => false,
        Node::Root { children } | Node::Element { children, .. } => {
            for child in children.iter_mut().rev() {
                if push_to_last_text(child) {
                    return true;
                }
            }
            false
        }
    }
}
