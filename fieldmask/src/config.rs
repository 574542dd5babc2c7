//! Declarative masker configuration.
//!
//! [`MaskConfig`] is the serde-friendly form of a rule set, for services that
//! keep their masking rules in a configuration file. Patterns are regular
//! expressions and are compiled when the config is turned into a builder.

use regex::Regex;
use serde::Deserialize;

use crate::{builder::MaskerBuilder, error::MaskError, handler::TextPolicy, masker::Masker};

/// A masker rule set loaded from configuration.
///
/// ```rust
/// use fieldmask::MaskConfig;
///
/// let config: MaskConfig = serde_json::from_str(
///     r#"{
///         "never_mask": "^(id|name)$",
///         "always_mask": "(?i)password|token",
///         "custom": [{"pattern": "card", "policy": {"keep_last": 4}}],
///         "max_length": 64
///     }"#,
/// )
/// .unwrap();
/// let masker = config.build().unwrap();
/// assert_eq!(masker.max_length(), 64);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaskConfig {
    /// Keys whose values are never changed.
    pub never_mask: Option<String>,
    /// Keys whose values are replaced with the placeholder.
    pub always_mask: Option<String>,
    /// Custom rules, tried in order.
    pub custom: Vec<CustomRuleConfig>,
    /// Maximum string length in runes; `0` means unlimited.
    pub max_length: usize,
    /// Maximum nesting depth; absent or `0` means unlimited.
    pub max_depth: Option<usize>,
    /// Replacement for always-masked values; defaults to `"***"`.
    pub placeholder: Option<String>,
}

/// One custom rule: a key pattern and the policy applied to matching values.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomRuleConfig {
    pub pattern: String,
    pub policy: TextPolicy,
}

impl MaskConfig {
    /// Compiles every pattern and returns a builder holding the rules.
    ///
    /// Fails with [`MaskError::InvalidPattern`] on the first pattern that does
    /// not compile.
    pub fn into_builder(self) -> Result<MaskerBuilder, MaskError> {
        let mut builder = Masker::builder().max_length(self.max_length);
        if let Some(pattern) = &self.never_mask {
            builder = builder.never_mask(compile(pattern)?);
        }
        if let Some(pattern) = &self.always_mask {
            builder = builder.always_mask(compile(pattern)?);
        }
        for rule in self.custom {
            builder = builder.custom(compile(&rule.pattern)?, rule.policy);
        }
        if let Some(max_depth) = self.max_depth {
            builder = builder.max_depth(max_depth);
        }
        if let Some(placeholder) = self.placeholder {
            builder = builder.placeholder(placeholder);
        }
        Ok(builder)
    }

    /// Compiles the configuration into a [`Masker`].
    pub fn build(self) -> Result<Masker, MaskError> {
        self.into_builder().map(MaskerBuilder::build)
    }
}

fn compile(pattern: &str) -> Result<Regex, MaskError> {
    Regex::new(pattern).map_err(|source| MaskError::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    })
}
