//! Partial-mode pre-stage.
//!
//! In [`Mode::Partial`] every algorithm compares the shorter string against
//! the best-aligned window of the longer one. The window is chosen here, once,
//! before the algorithm runs, so the algorithms themselves never see the mode.

use crate::core::types::Mode;
use crate::matching::scoring::best_window;

/// Restrict the longer of `a` and `b` to its window that best aligns with the
/// shorter one. Argument roles are preserved.
///
/// Pairs of equal character length, or where either side is empty, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use fuzzy_rank::matching::alignment::align;
///
/// assert_eq!(align("apple", "my apple pie"), ("apple", "apple"));
/// assert_eq!(align("my apple pie", "apple"), ("apple", "apple"));
/// assert_eq!(align("", "apple"), ("", "apple"));
/// ```
#[must_use]
pub fn align<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len() == b_chars.len() || a_chars.is_empty() || b_chars.is_empty() {
        return (a, b);
    }

    if a_chars.len() < b_chars.len() {
        let (offset, _) = best_window(&a_chars, &b_chars);
        (a, char_window(b, offset, a_chars.len()))
    } else {
        let (offset, _) = best_window(&b_chars, &a_chars);
        (char_window(a, offset, b_chars.len()), b)
    }
}

/// Run `score` on the pair as seen under `mode`
pub fn score_with_mode<F>(mode: Mode, a: &str, b: &str, score: F) -> f64
where
    F: FnOnce(&str, &str) -> f64,
{
    match mode {
        Mode::Full => score(a, b),
        Mode::Partial => {
            let (a, b) = align(a, b);
            score(a, b)
        }
    }
}

/// Borrow `len` chars of `s` starting at char offset `start`
fn char_window(s: &str, start: usize, len: usize) -> &str {
    let mut boundaries = s
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()));

    let begin = boundaries.nth(start).unwrap_or(s.len());
    let end = if len == 0 {
        begin
    } else {
        boundaries.nth(len - 1).unwrap_or(s.len())
    };
    &s[begin..end]
}
