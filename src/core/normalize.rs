//! Optional preprocessing applied to queries and candidates alike.

use std::borrow::Cow;

/// Normalize a string for comparison.
///
/// When `enabled` is false the input is returned untouched. Otherwise the
/// string is lowercased and every run of whitespace is collapsed to a single
/// space, with leading and trailing whitespace removed.
///
/// # Examples
///
/// ```
/// use fuzzy_rank::normalize;
///
/// assert_eq!(normalize("  Hello\t\tWORLD ", true), "hello world");
/// assert_eq!(normalize("  Hello ", false), "  Hello ");
/// ```
#[must_use]
pub fn normalize(s: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    for token in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&token.to_lowercase());
    }
    Cow::Owned(out)
}

/// Split a string into whitespace-delimited tokens
#[must_use]
pub fn tokenize(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}
