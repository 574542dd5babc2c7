//! Custom rule handlers.
//!
//! A handler rewrites the text form of a value whose key matched a custom
//! rule. Any `Fn(&str, &str) -> String` closure is a handler; [`TextPolicy`]
//! provides the common transformations and can be loaded from configuration.

use std::{borrow::Cow, iter::repeat_n};

use serde::Deserialize;

use crate::truncate::truncate;

/// Character used by [`TextPolicy`] to hide masked runes.
pub const MASK_CHAR: char = '*';

/// Rewrites a matched value.
///
/// `key` is the key that matched the rule and `value` is the text form of the
/// value (see [`crate::Node::to_text`]). The returned string replaces the
/// value in the output.
pub trait MaskHandler: Send + Sync {
    fn mask(&self, key: &str, value: &str) -> String;
}

impl<F> MaskHandler for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn mask(&self, key: &str, value: &str) -> String {
        self(key, value)
    }
}

/// A stock text transformation.
///
/// All policies operate on Unicode scalar values. Values too short to hide
/// anything are returned unchanged.
///
/// In configuration files policies are written as a single-entry map, e.g.
/// `{"keep_last": 4}` or `{"replace": "[REDACTED]"}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPolicy {
    /// Replaces the value with fixed text.
    Replace(Cow<'static, str>),
    /// Keeps the first `n` runes and masks the rest.
    KeepFirst(usize),
    /// Keeps the last `n` runes and masks the rest.
    KeepLast(usize),
    /// Keeps the first `n` runes of an email's local part and the whole domain.
    ///
    /// Inputs without `@` are treated like [`TextPolicy::KeepFirst`].
    Email(usize),
    /// Truncates to `n` runes using the same format as the masker's `max_length`.
    Truncate(usize),
}

impl TextPolicy {
    /// Replaces values with `placeholder`.
    #[must_use]
    pub fn replace<P>(placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self::Replace(placeholder.into())
    }

    /// Applies the policy to `value`.
    ///
    /// # Example
    /// ```
    /// use fieldmask::TextPolicy;
    ///
    /// assert_eq!(TextPolicy::KeepLast(4).apply_to("4111111111111111"), "************1111");
    /// assert_eq!(TextPolicy::Email(2).apply_to("alice@example.com"), "al***@example.com");
    /// ```
    #[must_use]
    pub fn apply_to(&self, value: &str) -> String {
        match self {
            TextPolicy::Replace(text) => text.clone().into_owned(),
            TextPolicy::KeepFirst(visible) => keep_first(value, *visible),
            TextPolicy::KeepLast(visible) => keep_last(value, *visible),
            TextPolicy::Email(visible) => match value.split_once('@') {
                Some((local, domain)) => format!("{}@{domain}", keep_first(local, *visible)),
                None => keep_first(value, *visible),
            },
            TextPolicy::Truncate(max_length) => truncate(value, *max_length).into_owned(),
        }
    }
}

impl MaskHandler for TextPolicy {
    fn mask(&self, _key: &str, value: &str) -> String {
        self.apply_to(value)
    }
}

fn keep_first(value: &str, visible: usize) -> String {
    let total = value.chars().count();
    if visible >= total {
        return value.to_owned();
    }
    value
        .chars()
        .take(visible)
        .chain(repeat_n(MASK_CHAR, total - visible))
        .collect()
}

fn keep_last(value: &str, visible: usize) -> String {
    let total = value.chars().count();
    if visible >= total {
        return value.to_owned();
    }
    let hidden = total - visible;
    repeat_n(MASK_CHAR, hidden)
        .chain(value.chars().skip(hidden))
        .collect()
}
