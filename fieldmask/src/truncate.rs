//! Rune-safe truncation of long strings.

use std::borrow::Cow;

/// Truncates `value` to at most `max_length` Unicode scalar values.
///
/// A truncated value keeps its first `max_length` runes followed by
/// `" ... (N more runes)"`, where `N` is the number of runes dropped.
/// A `max_length` of `0` disables truncation. Values that fit are borrowed,
/// not copied.
///
/// ```
/// use fieldmask::truncate;
///
/// assert_eq!(truncate("Go语言泛型", 4), "Go语言 ... (2 more runes)");
/// assert_eq!(truncate("short", 10), "short");
/// ```
pub fn truncate(value: &str, max_length: usize) -> Cow<'_, str> {
    if max_length == 0 || value.len() <= max_length {
        // A string never has more runes than bytes.
        return Cow::Borrowed(value);
    }
    match value.char_indices().nth(max_length) {
        None => Cow::Borrowed(value),
        Some((cut, _)) => {
            let (head, tail) = value.split_at(cut);
            let more = tail.chars().count();
            Cow::Owned(format!("{head} ... ({more} more runes)"))
        }
    }
}
