//! Construction of a [`Masker`].

use std::borrow::Cow;

use crate::{
    handler::MaskHandler,
    masker::{CustomRule, MASK_PLACEHOLDER, Masker, Rules},
    matcher::KeyMatcher,
};

/// Builder for [`Masker`].
///
/// Each method sets one rule and options apply in call order: calling a
/// single-valued setter twice keeps the last value, while [`custom`] and
/// [`custom_fn`] append to the rule list.
///
/// Patterns are compiled by the caller before they reach the builder, so
/// building never fails. Use [`crate::MaskConfig`] to compile patterns from
/// configuration with error reporting.
///
/// [`custom`]: MaskerBuilder::custom
/// [`custom_fn`]: MaskerBuilder::custom_fn
#[must_use]
pub struct MaskerBuilder {
    never_mask: Option<Box<dyn KeyMatcher>>,
    always_mask: Option<Box<dyn KeyMatcher>>,
    custom: Vec<CustomRule>,
    max_length: usize,
    max_depth: Option<usize>,
    placeholder: Cow<'static, str>,
}

impl MaskerBuilder {
    pub fn new() -> Self {
        Self {
            never_mask: None,
            always_mask: None,
            custom: Vec::new(),
            max_length: 0,
            max_depth: None,
            placeholder: Cow::Borrowed(MASK_PLACEHOLDER),
        }
    }

    /// Values under matching keys are never changed, whatever other rules say.
    pub fn never_mask<M>(mut self, matcher: M) -> Self
    where
        M: KeyMatcher + 'static,
    {
        self.never_mask = Some(Box::new(matcher));
        self
    }

    /// Values under matching keys are replaced with the placeholder.
    pub fn always_mask<M>(mut self, matcher: M) -> Self
    where
        M: KeyMatcher + 'static,
    {
        self.always_mask = Some(Box::new(matcher));
        self
    }

    /// Appends a custom rule. Rules are tried in the order they were added.
    pub fn custom<M, H>(mut self, matcher: M, handler: H) -> Self
    where
        M: KeyMatcher + 'static,
        H: MaskHandler + 'static,
    {
        self.custom.push(CustomRule {
            matcher: Box::new(matcher),
            handler: Box::new(handler),
        });
        self
    }

    /// Appends a custom rule backed by a closure taking `(key, value)`.
    pub fn custom_fn<M, F>(self, matcher: M, handler: F) -> Self
    where
        M: KeyMatcher + 'static,
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.custom(matcher, handler)
    }

    /// Caps string values at `max_length` runes. `0` disables truncation.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Rejects inputs nesting more than `max_depth` objects or arrays.
    /// `0` disables the limit, which is also the default.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = (max_depth > 0).then_some(max_depth);
        self
    }

    /// Replaces the default `"***"` placeholder used by the always-mask rule.
    pub fn placeholder<P>(mut self, placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        self.placeholder = placeholder.into();
        self
    }

    pub fn build(self) -> Masker {
        Masker::from_rules(Rules {
            never_mask: self.never_mask,
            always_mask: self.always_mask,
            custom: self.custom,
            max_length: self.max_length,
            max_depth: self.max_depth,
            placeholder: self.placeholder,
        })
    }
}

impl Default for MaskerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
