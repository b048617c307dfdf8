//! Excerpt behavior over fixture documents.

use crate::common::fixture;
use mdfields::{ExcerptFormat, ExcerptParams, MarkdownDocument, Node, ParseOptions};

fn pony() -> MarkdownDocument {
    MarkdownDocument::parse(&fixture("pony.md"))
}

fn with_separator(name: &str) -> MarkdownDocument {
    let options = ParseOptions {
        excerpt_separator: Some("<!-- end -->".to_string()),
        ..Default::default()
    };
    MarkdownDocument::parse_with(&fixture(name), &options)
}

#[test]
fn default_excerpt_prunes_word_safe() {
    let excerpt = pony().excerpt(&ExcerptParams::default()).unwrap();
    assert!(excerpt.starts_with("Where oh where is my little pony?"));
    assert!(excerpt.ends_with("gates closed\u{2026}"));
    assert_eq!(excerpt.chars().count(), 140);
}

#[test]
fn custom_prune_length_backs_up_to_a_word_boundary() {
    let params = ExcerptParams {
        prune_length: 50,
        ..Default::default()
    };
    assert_eq!(
        pony().excerpt(&params).unwrap(),
        "Where oh where is my little pony? Oh where oh\u{2026}"
    );
}

#[test]
fn truncate_cuts_exactly_at_the_limit() {
    let params = ExcerptParams {
        prune_length: 50,
        truncate: true,
        ..Default::default()
    };
    let excerpt = pony().excerpt(&params).unwrap();
    assert_eq!(excerpt, "Where oh where is my little pony? Oh where oh whe\u{2026}");
    assert_eq!(excerpt.chars().count(), 50);
}

#[test]
fn html_excerpt_is_a_pruned_fragment() {
    let params = ExcerptParams {
        prune_length: 50,
        format: ExcerptFormat::Html,
        ..Default::default()
    };
    assert_eq!(
        pony().excerpt(&params).unwrap(),
        "<p>Where oh where is my little pony? Oh where oh\u{2026}</p>"
    );
}

#[test]
fn markdown_excerpt_is_pruned_commonmark() {
    let params = ExcerptParams {
        prune_length: 50,
        format: ExcerptFormat::Markdown,
        ..Default::default()
    };
    assert_eq!(
        pony().excerpt(&params).unwrap(),
        "Where oh where is my little pony? Oh where oh\u{2026}\n"
    );
}

#[test]
fn excerpt_ast_has_the_conventional_shape() {
    let ast = pony().excerpt_ast(50, false);
    let json = serde_json::to_value(&ast).unwrap();
    assert_eq!(json["type"], "root");
    let p = &json["children"][0];
    assert_eq!(p["type"], "element");
    assert_eq!(p["tagName"], "p");
    assert_eq!(p["properties"], serde_json::json!({}));
    assert_eq!(
        p["children"][0]["value"],
        "Where oh where is my little pony? Oh where oh\u{2026}"
    );
}

#[test]
fn separator_head_is_unpruned_in_every_format() {
    let doc = with_separator("separator.md");
    let tiny = |format| ExcerptParams {
        prune_length: 10,
        format,
        ..Default::default()
    };

    assert_eq!(
        doc.excerpt(&tiny(ExcerptFormat::Plain)).unwrap(),
        "Where oh where is my little pony?"
    );
    assert_eq!(
        doc.excerpt(&tiny(ExcerptFormat::Html)).unwrap(),
        "<p>Where oh where is my little pony?</p>"
    );
    assert_eq!(
        doc.excerpt(&tiny(ExcerptFormat::Markdown)).unwrap(),
        "Where oh where is my little pony?\n"
    );

    let ast = doc.excerpt_ast(10, false);
    assert_eq!(
        ast,
        Node::root(vec![Node::element(
            "p",
            vec![],
            vec![Node::text("Where oh where is my little pony?")],
        )])
    );
}

#[test]
fn separator_configured_but_absent_falls_back_to_pruning() {
    let doc = with_separator("pony.md");
    let params = ExcerptParams {
        prune_length: 50,
        ..Default::default()
    };
    assert_eq!(
        doc.excerpt(&params).unwrap(),
        "Where oh where is my little pony? Oh where oh\u{2026}"
    );
}

#[test]
fn short_document_is_returned_whole() {
    let doc = MarkdownDocument::parse("Just a short note.\n");
    let excerpt = doc.excerpt(&ExcerptParams::default()).unwrap();
    assert_eq!(excerpt, "Just a short note.");
}

#[test]
fn prune_length_zero_yields_empty_excerpt() {
    let params = ExcerptParams {
        prune_length: 0,
        ..Default::default()
    };
    assert_eq!(pony().excerpt(&params).unwrap(), "");
    assert!(pony().excerpt_ast(0, false).is_empty_root());
}

#[test]
fn image_alt_text_counts_in_the_plain_excerpt() {
    let doc = MarkdownDocument::parse("Where oh where is ![that pony](pony.png)?\n");
    let excerpt = doc.excerpt(&ExcerptParams::default()).unwrap();
    assert_eq!(excerpt, "Where oh where is that pony?");
}
