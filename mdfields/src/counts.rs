//! Word, sentence and paragraph counting plus the reading-time estimate.

use crate::ast::Node;
use crate::excerpt::to_plain_text;
use serde::Serialize;

/// Default reading speed for [`time_to_read`].
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 265;

/// Word, sentence and paragraph totals for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
}

/// Count words, sentences and paragraphs in a document tree.
///
/// Words are whitespace-separated tokens of the flattened text. Sentences
/// are segments ending in a run of `.`, `!` or `?` that contain at least
/// one alphanumeric character. Paragraphs are `<p>` elements.
pub fn word_count(tree: &Node) -> WordCount {
    let text = to_plain_text(tree);
    WordCount {
        words: text.split_whitespace().count(),
        sentences: count_sentences(&text),
        paragraphs: count_paragraphs(tree),
    }
}

/// Estimated reading time in whole minutes, never less than one.
pub fn time_to_read(words: usize, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as f64;
    let minutes = (words as f64 / wpm).round() as u32;
    minutes.max(1)
}

fn count_sentences(text: &str) -> usize {
    let mut sentences = 0;
    let mut has_content = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            // Swallow the rest of the terminator run.
            while matches!(chars.peek(), Some('.' | '!' | '?')) {
                chars.next();
            }
            if has_content {
                sentences += 1;
            }
            has_content = false;
        } else if c.is_alphanumeric() {
            has_content = true;
        }
    }
    // Trailing text without a terminator still counts.
    if has_content {
        sentences += 1;
    }
    sentences
}

fn count_paragraphs(node: &Node) -> usize {
    let own = usize::from(node.tag() == Some("p"));
    own + node.children().iter().map(count_paragraphs).sum::<usize>()
}
