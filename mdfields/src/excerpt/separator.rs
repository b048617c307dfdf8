//! Excerpt separator lookup.
//!
//! The separator is matched against the raw Markdown source before any
//! parsing, as an exact substring. When it is present, everything before
//! its first occurrence is the excerpt head and is returned without
//! pruning.

/// Return the portion of `source` before the first occurrence of the
/// separator, or `None` when no separator is configured or it does not
/// appear in the source.
pub fn locate_head<'a>(source: &'a str, separator: Option<&str>) -> Option<&'a str> {
    let separator = separator?;
    if separator.is_empty() {
        return None;
    }
    source.find(separator).map(|index| &source[..index])
}
