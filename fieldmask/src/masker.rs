//! The masking engine.
//!
//! A [`Masker`] evaluates its rules against every key of the input, in a fixed
//! order of precedence:
//!
//! 1. never mask: the value is copied unchanged, nested structure included
//! 2. always mask: the value becomes the placeholder, nested structure discarded
//! 3. custom rules, in declaration order: the first match rewrites the value
//! 4. objects and arrays are walked recursively
//! 5. strings are truncated to `max_length` runes; other scalars are copied
//!
//! Array elements are keyed by their index as a decimal string (`"0"`, `"1"`,
//! ...). This lets a pattern such as `^0$` target positions, and it also means
//! a pattern like `1` matches indices `1`, `10`, `21` and so on; anchor index
//! patterns accordingly.

use std::{borrow::Cow, collections::BTreeMap, fmt, sync::Arc};

use crate::{
    adapter::ToTree,
    builder::MaskerBuilder,
    error::MaskError,
    handler::MaskHandler,
    matcher::KeyMatcher,
    multimap::{MaskedMultiMap, MaskedValues},
    tree::{Node, Scalar},
    truncate::truncate,
};

/// Default replacement for values whose key matches the always-mask rule.
pub const MASK_PLACEHOLDER: &str = "***";

// =============================================================================
// Rules - immutable rule set shared by every call
// =============================================================================

pub(crate) struct CustomRule {
    pub(crate) matcher: Box<dyn KeyMatcher>,
    pub(crate) handler: Box<dyn MaskHandler>,
}

pub(crate) struct Rules {
    pub(crate) never_mask: Option<Box<dyn KeyMatcher>>,
    pub(crate) always_mask: Option<Box<dyn KeyMatcher>>,
    pub(crate) custom: Vec<CustomRule>,
    pub(crate) max_length: usize,
    pub(crate) max_depth: Option<usize>,
    pub(crate) placeholder: Cow<'static, str>,
}

/// What to do with the value stored under a key.
enum Decision<'r> {
    Keep,
    Mask,
    Custom(&'r dyn MaskHandler),
    Descend,
}

impl Rules {
    fn decide(&self, key: &str) -> Decision<'_> {
        if self.never_mask.as_ref().is_some_and(|m| m.is_match(key)) {
            return Decision::Keep;
        }
        if self.always_mask.as_ref().is_some_and(|m| m.is_match(key)) {
            return Decision::Mask;
        }
        self.custom
            .iter()
            .find(|rule| rule.matcher.is_match(key))
            .map_or(Decision::Descend, |rule| Decision::Custom(rule.handler.as_ref()))
    }

    fn truncate_owned(&self, value: String) -> String {
        let truncated = match truncate(&value, self.max_length) {
            Cow::Owned(truncated) => Some(truncated),
            Cow::Borrowed(_) => None,
        };
        truncated.unwrap_or(value)
    }
}

// =============================================================================
// Masker - public entrypoints
// =============================================================================

/// Produces masked copies of structured values.
///
/// A masker is immutable once built. Cloning is cheap (the rules are shared),
/// and a single instance can be used from many threads at once.
///
/// ```rust
/// use fieldmask::Masker;
/// use regex::Regex;
/// use serde_json::json;
///
/// let masker = Masker::builder()
///     .never_mask(Regex::new("name").unwrap())
///     .always_mask(Regex::new("title").unwrap())
///     .build();
///
/// let masked = masker.mask(&json!({"name": "test", "title": "5"})).unwrap();
/// assert_eq!(masked.to_string(), r#"{"name":"test","title":"***"}"#);
/// ```
#[derive(Clone)]
pub struct Masker {
    rules: Arc<Rules>,
}

impl Masker {
    /// Starts building a masker with no rules.
    pub fn builder() -> MaskerBuilder {
        MaskerBuilder::new()
    }

    pub(crate) fn from_rules(rules: Rules) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// The configured truncation length in runes; `0` means unlimited.
    pub fn max_length(&self) -> usize {
        self.rules.max_length
    }

    /// The replacement used by the always-mask rule.
    pub fn placeholder(&self) -> &str {
        &self.rules.placeholder
    }

    /// Converts `value` into a tree and masks it.
    ///
    /// The top-level value must serialize to an object or an array.
    pub fn mask<T>(&self, value: &T) -> Result<Node, MaskError>
    where
        T: ToTree + ?Sized,
    {
        self.mask_tree_owned(value.to_tree()?)
    }

    /// Converts `value` into a tree and masks it, requiring an object at the top.
    ///
    /// This is the entry point for struct-like values. Sequences are rejected
    /// with [`MaskError::UnsupportedShape`].
    pub fn mask_struct<T>(&self, value: &T) -> Result<BTreeMap<String, Node>, MaskError>
    where
        T: ToTree + ?Sized,
    {
        match value.to_tree()? {
            Node::Object(map) => self.mask_object(map, 0),
            other => Err(MaskError::UnsupportedShape {
                expected: "object",
                found: other.kind(),
            }),
        }
    }

    /// Masks a tree, leaving the input untouched.
    ///
    /// The top-level node must be an object or an array.
    pub fn mask_tree(&self, tree: &Node) -> Result<Node, MaskError> {
        if tree.is_scalar() {
            return Err(Self::scalar_at_top(tree));
        }
        self.mask_container_ref(tree, 0)
    }

    /// Masks a tree that is no longer needed, reusing its allocations.
    pub fn mask_tree_owned(&self, tree: Node) -> Result<Node, MaskError> {
        if tree.is_scalar() {
            return Err(Self::scalar_at_top(&tree));
        }
        self.mask_container(tree, 0)
    }

    /// Masks a single value stored under `key`, applying the full rule order.
    ///
    /// Unlike [`Masker::mask_tree`], any node kind is accepted.
    pub fn mask_entry(&self, key: &str, value: &Node) -> Result<Node, MaskError> {
        self.mask_keyed_ref(key, value, 0)
    }

    /// Masks a flat map of keys to value lists, such as URL query parameters.
    ///
    /// Rules are evaluated once per key:
    ///
    /// - never mask: the values are copied unchanged
    /// - always mask: the whole entry collapses to the placeholder string
    /// - custom rule: the handler is applied to each value
    /// - otherwise each value is truncated to `max_length` runes
    ///
    /// If the input yields a key more than once, the last entry wins.
    ///
    /// ```rust
    /// use std::collections::HashMap;
    ///
    /// use fieldmask::{MaskedValues, Masker};
    /// use regex::Regex;
    ///
    /// let masker = Masker::builder().always_mask(Regex::new("title").unwrap()).build();
    /// let query = HashMap::from([("title".to_string(), vec!["1".to_string(), "2".to_string()])]);
    ///
    /// let masked = masker.mask_multi_map(&query);
    /// assert_eq!(masked["title"], MaskedValues::Masked("***".to_string()));
    /// ```
    pub fn mask_multi_map<I, K, V, S>(&self, entries: I) -> MaskedMultiMap
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[S]>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .map(|(key, values)| {
                let key = key.as_ref();
                let values = values.as_ref().iter().map(|value| value.as_ref());
                let masked = match self.rules.decide(key) {
                    Decision::Keep => MaskedValues::Values(values.map(str::to_owned).collect()),
                    Decision::Mask => MaskedValues::Masked(self.rules.placeholder.to_string()),
                    Decision::Custom(handler) => MaskedValues::Values(
                        values.map(|value| handler.mask(key, value)).collect(),
                    ),
                    Decision::Descend => MaskedValues::Values(
                        values
                            .map(|value| truncate(value, self.rules.max_length).into_owned())
                            .collect(),
                    ),
                };
                (key.to_owned(), masked)
            })
            .collect()
    }

    fn scalar_at_top(tree: &Node) -> MaskError {
        MaskError::UnsupportedShape {
            expected: "object or array",
            found: tree.kind(),
        }
    }

    fn mask_keyed(&self, key: &str, value: Node, depth: usize) -> Result<Node, MaskError> {
        match self.rules.decide(key) {
            Decision::Keep => Ok(value),
            Decision::Mask => Ok(Node::from(&*self.rules.placeholder)),
            Decision::Custom(handler) => Ok(Node::from(handler.mask(key, &value.to_text()))),
            Decision::Descend => self.mask_container(value, depth),
        }
    }

    /// Walks `value`; `depth` is the number of containers enclosing it.
    fn mask_container(&self, value: Node, depth: usize) -> Result<Node, MaskError> {
        match value {
            Node::Object(map) => self.mask_object(map, depth).map(Node::Object),
            Node::Array(items) => {
                self.check_depth(depth)?;
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| self.mask_keyed(&index.to_string(), child, depth + 1))
                    .collect::<Result<Vec<_>, MaskError>>()
                    .map(Node::Array)
            }
            Node::Scalar(Scalar::String(s)) => {
                Ok(Node::Scalar(Scalar::String(self.rules.truncate_owned(s))))
            }
            scalar @ Node::Scalar(_) => Ok(scalar),
        }
    }

    fn mask_object(
        &self,
        map: BTreeMap<String, Node>,
        depth: usize,
    ) -> Result<BTreeMap<String, Node>, MaskError> {
        self.check_depth(depth)?;
        map.into_iter()
            .map(|(key, child)| {
                let masked = self.mask_keyed(&key, child, depth + 1)?;
                Ok((key, masked))
            })
            .collect()
    }

    // Borrowed walk: only subtrees that survive into the output are cloned.
    fn mask_keyed_ref(&self, key: &str, value: &Node, depth: usize) -> Result<Node, MaskError> {
        match self.rules.decide(key) {
            Decision::Keep => Ok(value.clone()),
            Decision::Mask => Ok(Node::from(&*self.rules.placeholder)),
            Decision::Custom(handler) => Ok(Node::from(handler.mask(key, &value.to_text()))),
            Decision::Descend => self.mask_container_ref(value, depth),
        }
    }

    fn mask_container_ref(&self, value: &Node, depth: usize) -> Result<Node, MaskError> {
        match value {
            Node::Object(map) => {
                self.check_depth(depth)?;
                map.iter()
                    .map(|(key, child)| {
                        let masked = self.mask_keyed_ref(key, child, depth + 1)?;
                        Ok((key.clone(), masked))
                    })
                    .collect::<Result<BTreeMap<_, _>, MaskError>>()
                    .map(Node::Object)
            }
            Node::Array(items) => {
                self.check_depth(depth)?;
                items
                    .iter()
                    .enumerate()
                    .map(|(index, child)| {
                        self.mask_keyed_ref(&index.to_string(), child, depth + 1)
                    })
                    .collect::<Result<Vec<_>, MaskError>>()
                    .map(Node::Array)
            }
            Node::Scalar(Scalar::String(s)) => Ok(Node::Scalar(Scalar::String(
                truncate(s, self.rules.max_length).into_owned(),
            ))),
            Node::Scalar(_) => Ok(value.clone()),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), MaskError> {
        match self.rules.max_depth {
            Some(limit) if depth >= limit => Err(MaskError::DepthLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}

impl Default for Masker {
    /// A masker without rules: values are copied unchanged.
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Masker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules = &self.rules;
        f.debug_struct("Masker")
            .field("never_mask", &rules.never_mask.is_some())
            .field("always_mask", &rules.always_mask.is_some())
            .field("custom_rules", &rules.custom.len())
            .field("max_length", &rules.max_length)
            .field("max_depth", &rules.max_depth)
            .field("placeholder", &rules.placeholder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use serde_json::json;

    use super::Masker;
    use crate::{MaskError, Node, NodeKind, TextPolicy};

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    fn mask_json(masker: &Masker, value: serde_json::Value) -> serde_json::Value {
        masker.mask(&value).unwrap().into()
    }

    #[test]
    fn never_mask_beats_always_mask() {
        let masker = Masker::builder()
            .always_mask(re("name"))
            .never_mask(re("name"))
            .build();
        assert_eq!(
            mask_json(&masker, json!({"name": "alice"})),
            json!({"name": "alice"})
        );
    }

    #[test]
    fn never_mask_keeps_nested_values_untruncated() {
        let masker = Masker::builder()
            .never_mask(re("^raw$"))
            .always_mask(re("secret"))
            .max_length(1)
            .build();
        let input = json!({"raw": {"secret": "abc", "list": ["long"]}});
        assert_eq!(mask_json(&masker, input.clone()), input);
    }

    #[test]
    fn always_mask_discards_structure() {
        let masker = Masker::builder().always_mask(re("^auth$")).build();
        assert_eq!(
            mask_json(&masker, json!({"auth": {"user": "u", "pass": "p"}, "n": 1})),
            json!({"auth": "***", "n": 1})
        );
    }

    #[test]
    fn always_mask_beats_custom_rules() {
        let masker = Masker::builder()
            .always_mask(re("token"))
            .custom(re("token"), TextPolicy::KeepLast(2))
            .build();
        assert_eq!(
            mask_json(&masker, json!({"token": "abcdef"})),
            json!({"token": "***"})
        );
    }

    #[test]
    fn first_matching_custom_rule_wins() {
        let masker = Masker::builder()
            .custom(re("card"), TextPolicy::KeepLast(4))
            .custom(re("card_number"), TextPolicy::replace("unused"))
            .build();
        assert_eq!(
            mask_json(&masker, json!({"card_number": "4111111111111111"})),
            json!({"card_number": "************1111"})
        );
    }

    #[test]
    fn custom_handlers_see_text_form_of_non_strings() {
        let masker = Masker::builder()
            .custom_fn(re("."), |key, value| format!("{key}:{value}"))
            .build();
        assert_eq!(
            mask_json(
                &masker,
                json!({"n": 12, "b": false, "z": null, "o": {"k": [1, 2]}})
            ),
            json!({"n": "n:12", "b": "b:false", "z": "z:", "o": r#"o:{"k":[1,2]}"#})
        );
    }

    #[test]
    fn custom_output_is_not_truncated() {
        let masker = Masker::builder()
            .custom_fn(re("^note$"), |_, value| value.repeat(3))
            .max_length(2)
            .build();
        assert_eq!(
            mask_json(&masker, json!({"note": "abc", "other": "abc"})),
            json!({"note": "abcabcabc", "other": "ab ... (1 more runes)"})
        );
    }

    #[test]
    fn truncation_skips_non_strings() {
        let masker = Masker::builder().max_length(1).build();
        let input = json!({"n": 123_456, "f": 1.25, "b": true, "z": null});
        assert_eq!(mask_json(&masker, input.clone()), input);
    }

    #[test]
    fn array_elements_are_keyed_by_index() {
        let masker = Masker::builder().always_mask(re("^0$")).build();
        assert_eq!(
            mask_json(&masker, json!({"list": ["a", "b", ["c", "d"]]})),
            json!({"list": ["***", "b", ["***", "d"]]})
        );
    }

    #[test]
    fn top_level_arrays_are_walked() {
        let masker = Masker::builder().always_mask(re("^1$")).build();
        assert_eq!(mask_json(&masker, json!(["a", "b"])), json!(["a", "***"]));
    }

    #[test]
    fn top_level_scalars_are_rejected() {
        let masker = Masker::default();
        let err = masker.mask(&"plain").unwrap_err();
        assert!(matches!(
            err,
            MaskError::UnsupportedShape {
                found: NodeKind::String,
                ..
            }
        ));
        assert!(masker.mask_tree(&Node::NULL).is_err());
    }

    #[test]
    fn mask_struct_rejects_arrays() {
        let err = Masker::default().mask_struct(&vec![1, 2]).unwrap_err();
        assert!(matches!(
            err,
            MaskError::UnsupportedShape {
                expected: "object",
                found: NodeKind::Array,
            }
        ));
    }

    #[test]
    fn mask_tree_leaves_input_untouched() {
        let masker = Masker::builder()
            .always_mask(re("secret"))
            .max_length(2)
            .build();
        let tree = Node::from(json!({"secret": "s", "text": "long text"}));
        let before = tree.clone();
        let masked = masker.mask_tree(&tree).unwrap();
        assert_eq!(tree, before);
        assert_eq!(masked.get("secret"), Some(&Node::from("***")));
    }

    #[test]
    fn borrowed_walk_matches_owned_walk() {
        let masker = Masker::builder()
            .never_mask(re("^raw$"))
            .always_mask(re("^(secret|0)$"))
            .custom(re("^card$"), TextPolicy::KeepLast(2))
            .max_length(3)
            .max_depth(4)
            .build();
        let tree = Node::from(json!({
            "raw": {"secret": "kept", "text": "not truncated"},
            "secret": {"big": ["a", "b", {"c": "d"}]},
            "card": 123_456,
            "list": ["first", "second", [true, null, 1.5]],
            "text": "long text"
        }));
        let borrowed = masker.mask_tree(&tree).unwrap();
        assert_eq!(borrowed, masker.mask_tree_owned(tree.clone()).unwrap());
        assert_eq!(
            serde_json::Value::from(borrowed),
            json!({
                "raw": {"secret": "kept", "text": "not truncated"},
                "secret": "***",
                "card": "****56",
                "list": ["***", "sec ... (3 more runes)", ["***", null, 1.5]],
                "text": "lon ... (6 more runes)"
            })
        );

        let deep = Node::from(json!({"a": {"b": {"c": {"d": {"e": 1}}}}}));
        assert!(matches!(
            masker.mask_tree(&deep),
            Err(MaskError::DepthLimitExceeded { limit: 4 })
        ));
    }

    #[test]
    fn mask_entry_applies_rules_to_the_given_key() {
        let masker = Masker::builder().always_mask(re("password")).build();
        assert_eq!(
            masker.mask_entry("password", &Node::from("pw")).unwrap(),
            Node::from("***")
        );
        assert_eq!(
            masker.mask_entry("user", &Node::from("bob")).unwrap(),
            Node::from("bob")
        );
    }

    #[test]
    fn depth_limit_rejects_deep_input() {
        let masker = Masker::builder().max_depth(2).build();
        assert!(masker.mask(&json!({"a": {"b": 1}})).is_ok());
        let err = masker.mask(&json!({"a": {"b": {"c": 1}}})).unwrap_err();
        assert!(matches!(err, MaskError::DepthLimitExceeded { limit: 2 }));
    }

    #[test]
    fn depth_limit_does_not_apply_to_masked_subtrees() {
        let masker = Masker::builder()
            .always_mask(re("^deep$"))
            .max_depth(1)
            .build();
        assert_eq!(
            mask_json(&masker, json!({"deep": {"a": {"b": 1}}})),
            json!({"deep": "***"})
        );
    }

    #[test]
    fn custom_placeholder_is_used() {
        let masker = Masker::builder()
            .always_mask(re("pin"))
            .placeholder("[REDACTED]")
            .build();
        assert_eq!(masker.placeholder(), "[REDACTED]");
        assert_eq!(
            mask_json(&masker, json!({"pin": 1234})),
            json!({"pin": "[REDACTED]"})
        );
    }

    #[test]
    fn debug_output_hides_rules() {
        let masker = Masker::builder().always_mask(re("x")).max_length(3).build();
        let debug = format!("{masker:?}");
        assert!(debug.contains("always_mask: true"));
        assert!(debug.contains("max_length: 3"));
    }
}
