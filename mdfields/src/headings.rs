//! Heading extraction.

use crate::ast::Node;
use crate::excerpt::to_plain_text;
use serde::Serialize;

/// A heading in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Text content with inline markup flattened away.
    pub value: String,
    /// Heading level, 1 through 6.
    pub depth: u8,
}

/// Collect the document's headings, optionally keeping only those at or
/// above `max_depth`.
pub fn headings(tree: &Node, max_depth: Option<u8>) -> Vec<Heading> {
    let mut found = Vec::new();
    collect(tree, max_depth, &mut found);
    found
}

fn collect(node: &Node, max_depth: Option<u8>, found: &mut Vec<Heading>) {
    if let Some(depth) = heading_depth(node) {
        if max_depth.map_or(true, |max| depth <= max) {
            found.push(Heading {
                value: to_plain_text(node),
                depth,
            });
        }
        return;
    }
    for child in node.children() {
        collect(child, max_depth, found);
    }
}

fn heading_depth(node: &Node) -> Option<u8> {
    match node.tag() {
        Some("h1") => Some(1),
        Some("h2") => Some(2),
        Some("h3") => Some(3),
        Some("h4") => Some(4),
        Some("h5") => Some(5),
        Some("h6") => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::parse_markdown;

    #[test]
    fn collects_headings_in_document_order() {
        let parsed = parse_markdown("# first\n\nsome text\n\n## second\n\n### third\n");
        assert_eq!(
            headings(&parsed.tree, None),
            vec![
                Heading { value: "first".to_string(), depth: 1 },
                Heading { value: "second".to_string(), depth: 2 },
                Heading { value: "third".to_string(), depth: 3 },
            ]
        );
    }

    #[test]
    fn inline_markup_is_flattened() {
        let parsed = parse_markdown("# An **important** heading with `inline code`\n");
        assert_eq!(
            headings(&parsed.tree, None),
            vec![Heading {
                value: "An important heading with inline code".to_string(),
                depth: 1,
            }]
        );
    }

    #[test]
    fn max_depth_filters_deeper_headings() {
        let parsed = parse_markdown("# one\n\n## two\n\n### three\n");
        let found = headings(&parsed.tree, Some(2));
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|h| h.depth <= 2));
    }

    #[test]
    fn document_without_headings_yields_empty_list() {
        let parsed = parse_markdown("just a paragraph\n");
        assert!(headings(&parsed.tree, None).is_empty());
    }
}
