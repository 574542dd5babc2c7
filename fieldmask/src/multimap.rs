//! Output of [`crate::Masker::mask_multi_map`].

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Masked multi-value map, keyed and ordered by the input keys.
pub type MaskedMultiMap = BTreeMap<String, MaskedValues>;

/// The masked values of one multi-map key.
///
/// Serializes as a bare string when masked and as a list otherwise, so an
/// always-masked key renders as `"title": "***"` rather than `"title": ["***"]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaskedValues {
    /// The entry matched the always-mask rule and collapsed to the placeholder.
    Masked(String),
    /// One output value per input value, in order.
    Values(Vec<String>),
}

impl MaskedValues {
    pub fn is_masked(&self) -> bool {
        matches!(self, MaskedValues::Masked(_))
    }

    /// Returns the value list, or `None` for a masked entry.
    pub fn values(&self) -> Option<&[String]> {
        match self {
            MaskedValues::Masked(_) => None,
            MaskedValues::Values(values) => Some(values),
        }
    }
}

impl Serialize for MaskedValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MaskedValues::Masked(placeholder) => serializer.serialize_str(placeholder),
            MaskedValues::Values(values) => values.serialize(serializer),
        }
    }
}
