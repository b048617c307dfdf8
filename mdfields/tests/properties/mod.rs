//! Property coverage for the pruning pipeline.

use mdfields::excerpt::{prune_str, prune_tree, to_plain_text};
use mdfields::{Node, ELLIPSIS};
use proptest::prelude::*;

fn text_len(node: &Node) -> usize {
    match node {
        Node::Text { value } => value.chars().count(),
        Node::Raw { .. } => 0,
        _ => node.children().iter().map(text_len).sum(),
    }
}

fn paragraphs(text: &str) -> Node {
    Node::root(
        text.split("  ")
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| Node::element("p", vec![], vec![Node::text(chunk)]))
            .collect(),
    )
}

proptest! {
    #[test]
    fn word_safe_prune_never_exceeds_budget_plus_ellipsis(
        text in "[a-zA-Z0-9 ]{0,200}",
        max_len in 0usize..120,
    ) {
        let pruned = prune_str(&text, max_len, false);
        prop_assert!(pruned.chars().count() <= max_len + 1);
    }

    #[test]
    fn hard_prune_is_exact_when_text_overflows(
        text in "[a-zA-Z0-9 ]{0,200}",
        max_len in 1usize..120,
    ) {
        let pruned = prune_str(&text, max_len, true);
        if text.chars().count() > max_len {
            prop_assert_eq!(pruned.chars().count(), max_len);
            prop_assert!(pruned.ends_with(ELLIPSIS));
        } else {
            prop_assert_eq!(pruned, text);
        }
    }

    #[test]
    fn text_within_budget_is_untouched(
        text in "[a-zA-Z0-9 ]{0,80}",
    ) {
        let budget = text.chars().count();
        prop_assert_eq!(prune_str(&text, budget, false), text.clone());
        prop_assert_eq!(prune_str(&text, budget, true), text);
    }

    #[test]
    fn word_safe_prune_never_ends_mid_word(
        text in "[a-zA-Z ]{0,200}",
        max_len in 1usize..120,
    ) {
        let pruned = prune_str(&text, max_len, false);
        if let Some(content) = pruned.strip_suffix(ELLIPSIS) {
            // The character after the kept content must not extend a word.
            let kept = content.chars().count();
            let mut chars = text.chars();
            let last = content.chars().last();
            let next = chars.nth(kept);
            if let (Some(last), Some(next)) = (last, next) {
                prop_assert!(!(last.is_alphanumeric() && next.is_alphanumeric()));
            }
        }
    }

    #[test]
    fn at_most_one_ellipsis_is_introduced(
        text in "[a-zA-Z ]{0,200}",
        max_len in 0usize..120,
        truncate in any::<bool>(),
    ) {
        let pruned = prune_str(&text, max_len, truncate);
        prop_assert!(pruned.matches(ELLIPSIS).count() <= 1);
    }

    #[test]
    fn tree_prune_respects_the_budget(
        text in "[a-z ]{0,160}",
        max_len in 0usize..100,
        truncate in any::<bool>(),
    ) {
        let tree = paragraphs(&text);
        let pruned = prune_tree(&tree, max_len, truncate);
        // Content stays within budget; the ellipsis may sit on top.
        prop_assert!(text_len(&pruned) <= max_len + 1);
    }

    #[test]
    fn tree_prune_within_budget_is_identity(
        text in "[a-z ]{0,160}",
        truncate in any::<bool>(),
    ) {
        let tree = paragraphs(&text);
        let budget = text_len(&tree);
        prop_assert_eq!(prune_tree(&tree, budget, truncate), tree);
    }

    #[test]
    fn tree_prune_is_idempotent(
        text in "[a-z ]{0,160}",
        max_len in 0usize..100,
    ) {
        let tree = paragraphs(&text);
        let once = prune_tree(&tree, max_len, false);
        let twice = prune_tree(&once, text_len(&once), false);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn tree_prune_keeps_a_prefix_of_the_flattened_text(
        text in "[a-z ]{0,160}",
        max_len in 0usize..100,
    ) {
        let tree = paragraphs(&text);
        let full = to_plain_text(&tree);
        let pruned = prune_tree(&tree, max_len, false);
        let head = to_plain_text(&pruned);
        let head = head.strip_suffix(ELLIPSIS).unwrap_or(&head);
        prop_assert!(full.starts_with(head.trim_end()));
    }
}
