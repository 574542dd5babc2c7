//! Adapters for emitting masked values through `slog`.
//!
//! Masked trees and multi-maps implement `slog::Value` and are emitted as
//! nested structured values via `slog`'s `nested-values` support.
//! [`SlogMaskedExt`] masks a value and wraps the result for logging in one step.
//!
//! Logging stays infallible: if a value cannot be masked, the logged value is
//! a string describing the failure, never the original value.
//!
//! ```ignore
//! use fieldmask::slog::SlogMaskedExt;
//!
//! info!(logger, "request"; "body" => body.slog_masked(&masker));
//! ```

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    adapter::ToTree,
    masker::Masker,
    multimap::{MaskedMultiMap, MaskedValues},
    tree::Node,
};

/// A masked tree ready to be logged with `slog`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskedJson(Node);

impl MaskedJson {
    /// Wraps an already-masked tree.
    pub fn new(masked: Node) -> Self {
        Self(masked)
    }

    pub fn value(&self) -> &Node {
        &self.0
    }

    pub fn into_inner(self) -> Node {
        self.0
    }
}

fn emit_node(
    node: &Node,
    record: &Record<'_>,
    key: Key,
    serializer: &mut dyn Serializer,
) -> SlogResult {
    match node.as_str() {
        Some(text) => serializer.emit_str(key, text),
        None => SlogValue::serialize(&slog::Serde(node.clone()), record, key, serializer),
    }
}

impl SlogValue for Node {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit_node(self, record, key, serializer)
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit_node(&self.0, record, key, serializer)
    }
}

impl SlogValue for MaskedValues {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        match self {
            MaskedValues::Masked(placeholder) => serializer.emit_str(key, placeholder),
            MaskedValues::Values(values) => {
                SlogValue::serialize(&slog::Serde(values.clone()), record, key, serializer)
            }
        }
    }
}

/// A masked multi-map ready to be logged with `slog`.
///
/// Logs as one nested value: always-masked keys hold the placeholder string,
/// every other key holds its list of values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskedMap(MaskedMultiMap);

impl MaskedMap {
    pub fn new(masked: MaskedMultiMap) -> Self {
        Self(masked)
    }

    pub fn value(&self) -> &MaskedMultiMap {
        &self.0
    }

    pub fn into_inner(self) -> MaskedMultiMap {
        self.0
    }
}

impl From<MaskedMultiMap> for MaskedMap {
    fn from(masked: MaskedMultiMap) -> Self {
        Self(masked)
    }
}

impl SlogValue for MaskedMap {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        SlogValue::serialize(&slog::Serde(self.0.clone()), record, key, serializer)
    }
}

/// Extension trait for logging masked values with `slog`.
pub trait SlogMaskedExt: ToTree {
    /// Masks `self` with `masker` and returns a value that logs as structured JSON.
    ///
    /// If masking fails, the returned value holds the string
    /// `"Failed to mask value: <error>"`.
    fn slog_masked(&self, masker: &Masker) -> MaskedJson {
        let masked = masker
            .mask(self)
            .unwrap_or_else(|err| Node::from(format!("Failed to mask value: {err}")));
        MaskedJson::new(masked)
    }
}

impl<T> SlogMaskedExt for T where T: ToTree + ?Sized {}
