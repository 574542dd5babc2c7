//! Key matching.
//!
//! Rules select values by key only. A key is an object field name, a
//! multi-map key, or the decimal index of an array element.

use std::{collections::HashSet, sync::Arc};

use regex::{Regex, RegexSet};

/// Decides whether a rule applies to a key.
///
/// Matchers are shared by every masking call and must be thread-safe.
pub trait KeyMatcher: Send + Sync {
    fn is_match(&self, key: &str) -> bool;
}

impl KeyMatcher for Regex {
    fn is_match(&self, key: &str) -> bool {
        Regex::is_match(self, key)
    }
}

impl KeyMatcher for RegexSet {
    fn is_match(&self, key: &str) -> bool {
        RegexSet::is_match(self, key)
    }
}

impl<T: KeyMatcher + ?Sized> KeyMatcher for &T {
    fn is_match(&self, key: &str) -> bool {
        (**self).is_match(key)
    }
}

impl<T: KeyMatcher + ?Sized> KeyMatcher for Box<T> {
    fn is_match(&self, key: &str) -> bool {
        (**self).is_match(key)
    }
}

impl<T: KeyMatcher + ?Sized> KeyMatcher for Arc<T> {
    fn is_match(&self, key: &str) -> bool {
        (**self).is_match(key)
    }
}

/// Matches keys that equal one of a fixed set of names, ignoring case.
///
/// ```rust
/// use fieldmask::{KeyList, KeyMatcher};
///
/// let keys = KeyList::new(["password", "apiKey"]);
/// assert!(keys.is_match("Password"));
/// assert!(keys.is_match("APIKEY"));
/// assert!(!keys.is_match("password_hint"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct KeyList {
    names: HashSet<String>,
}

impl KeyList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeyList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl KeyMatcher for KeyList {
    fn is_match(&self, key: &str) -> bool {
        self.names.contains(&key.to_lowercase())
    }
}
