//! Core data structures for the document tree.
//!
//! The tree is the single representation every field is derived from: an
//! owned, immutable value built once by the Markdown parser and then only
//! ever copied by the excerpt pipeline. Shape follows the conventional
//! hypertext-AST layout (`type` tag, `tagName`, `properties`, `children`)
//! so the serialized form matches what downstream consumers expect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single node in the document tree.
///
/// Either a tagged container (`Root`, `Element`), a text leaf, or a chunk
/// of embedded HTML carried through verbatim (`Raw`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// The root of a document.
    Root { children: Vec<Node> },
    /// A tagged container with attributes and ordered children.
    Element {
        #[serde(rename = "tagName")]
        tag_name: String,
        properties: BTreeMap<String, String>,
        children: Vec<Node>,
    },
    /// A literal text run.
    Text { value: String },
    /// Embedded HTML, passed through output unescaped and never counted
    /// as text by the excerpt pipeline.
    Raw { value: String },
}

impl Node {
    /// Create a root node.
    pub fn root(children: Vec<Node>) -> Node {
        Node::Root { children }
    }

    /// Create an element with attributes and children.
    pub fn element(tag: &str, attrs: Vec<(&str, &str)>, children: Vec<Node>) -> Node {
        Node::Element {
            tag_name: tag.to_string(),
            properties: attrs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            children,
        }
    }

    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Node {
        Node::Text {
            value: value.into(),
        }
    }

    /// Create a raw HTML node.
    pub fn raw(value: impl Into<String>) -> Node {
        Node::Raw {
            value: value.into(),
        }
    }

    /// The element tag, if this node is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag_name, .. } => Some(tag_name.as_str()),
            _ => None,
        }
    }

    /// Attribute lookup on elements; `None` for other node kinds.
    pub fn property(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { properties, .. } => properties.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Children of container nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// True for `Root` with no children.
    pub fn is_empty_root(&self) -> bool {
        matches!(self, Node::Root { children } if children.is_empty())
    }
}
