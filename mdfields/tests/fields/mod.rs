//! Derived fields over fixture documents.

use crate::common::fixture;
use mdfields::{Heading, MarkdownDocument};

fn kitchen() -> MarkdownDocument {
    MarkdownDocument::parse(&fixture("kitchen.md"))
}

#[test]
fn html_renders_the_whole_document() {
    let html = kitchen().html().unwrap();

    assert!(html.contains(
        "<h1>An <strong>important</strong> heading with <code>inline code</code></h1>"
    ));
    assert!(html.contains("<p>Where oh where is my little pony? Oh where did he go!</p>"));
    assert!(html.contains("<table>"));
    assert!(html.contains("<th>Pony</th>"));
    assert!(html.contains("<td>My Little Pony</td>"));
    assert!(html.contains("<img alt=\"Where oh where is that pony?\" src=\"pony.png\">"));
}

#[test]
fn inline_html_passes_through_unescaped() {
    let html = kitchen().html().unwrap();
    assert!(html.contains("Where is my <code>pony</code> named leo?"));
}

#[test]
fn code_block_info_string_becomes_class_and_meta() {
    let html = kitchen().html().unwrap();
    assert!(html.contains("<pre><code class=\"language-js\" data-meta=\"foo bar\">"));
    assert!(html.contains("console.log('hello world')"));
}

#[test]
fn headings_are_flattened_and_ordered() {
    assert_eq!(
        kitchen().headings(None),
        vec![
            Heading {
                value: "An important heading with inline code".to_string(),
                depth: 1,
            },
            Heading {
                value: "Appearances".to_string(),
                depth: 2,
            },
        ]
    );
}

#[test]
fn headings_respect_the_depth_filter() {
    let found = kitchen().headings(Some(1));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].depth, 1);
}

#[test]
fn word_count_covers_words_sentences_and_paragraphs() {
    let doc = MarkdownDocument::parse(
        "Where oh where is my little pony? Oh where did he go!\n\nHe went to the fair.\n",
    );
    let count = doc.word_count();
    assert_eq!(count.words, 17);
    assert_eq!(count.sentences, 3);
    assert_eq!(count.paragraphs, 2);
}

#[test]
fn time_to_read_never_reports_zero() {
    let doc = MarkdownDocument::parse("A few words only.\n");
    assert_eq!(doc.time_to_read(265), 1);
}

#[test]
fn frontmatter_is_exposed_raw_and_parsed() {
    let doc = MarkdownDocument::parse(&fixture("pony.md"));
    let raw = doc.frontmatter().unwrap();
    assert!(raw.contains("title: \"Where oh where is my little pony?\""));

    let value = doc.frontmatter_value().unwrap().unwrap();
    assert_eq!(
        value["title"],
        serde_yaml::Value::from("Where oh where is my little pony?")
    );
    assert_eq!(
        value["date"],
        serde_yaml::Value::from("2017-09-18T23:19:51.246Z")
    );
}

#[test]
fn frontmatter_stays_out_of_the_rendered_output() {
    let doc = MarkdownDocument::parse(&fixture("pony.md"));
    let html = doc.html().unwrap();
    assert!(!html.contains("title:"));
    assert!(html.starts_with("<p>Where oh where is my little pony?"));
}

#[test]
fn html_ast_serializes_with_type_tags() {
    let doc = MarkdownDocument::parse("Where oh where is my little pony?\n");
    let json = serde_json::to_value(doc.html_ast()).unwrap();
    assert_eq!(json["type"], "root");
    assert_eq!(json["children"][0]["tagName"], "p");
}
