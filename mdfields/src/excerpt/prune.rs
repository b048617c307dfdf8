//! String pruning for plain-text excerpts.
//!
//! Two modes, both counting in characters rather than bytes:
//!
//! * word-safe (default): never cut inside a word. The result holds at
//!   most `max_len` characters of content plus the ellipsis.
//! * hard (`truncate`): cut exactly at the limit. The result, ellipsis
//!   included, is exactly `max_len` characters.

use super::ELLIPSIS;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Given a window of `max_len + 1` characters, find how many leading
/// characters survive a word-safe cut at `max_len`.
///
/// When the character after the limit continues a word, the whole partial
/// word is dropped; otherwise only the overflow character is. Trailing
/// whitespace is stripped either way. `max_len` must be at least 1.
pub(crate) fn word_safe_end(window: &[char], max_len: usize) -> usize {
    debug_assert_eq!(window.len(), max_len + 1);

    let mut end = if is_word_char(window[max_len]) && is_word_char(window[max_len - 1]) {
        let mut end = max_len + 1;
        while end > 0 && !window[end - 1].is_whitespace() {
            end -= 1;
        }
        end
    } else {
        max_len
    };
    while end > 0 && window[end - 1].is_whitespace() {
        end -= 1;
    }
    end
}

/// Prune `text` down to `max_len` characters, appending an ellipsis when
/// anything was removed.
///
/// Text already within the limit is returned unchanged. A limit of zero
/// yields an empty string with no ellipsis.
pub fn prune_str(text: &str, max_len: usize, truncate: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return text.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    if truncate {
        let mut out: String = chars[..max_len - 1].iter().collect();
        out.push(ELLIPSIS);
        return out;
    }

    let keep = word_safe_end(&chars[..max_len + 1], max_len);
    let mut out: String = chars[..keep].iter().collect();
    out.push(ELLIPSIS);
    out
}
