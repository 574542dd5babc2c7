//! Error types for masking.
//!
//! Masking itself is deterministic. Errors come from the boundaries around it:
//! converting an input into a tree, rejecting an input shape, or compiling a
//! configured pattern. No partial output is ever returned alongside an error.

use crate::tree::NodeKind;

/// Errors returned by the public masking API.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    /// The input value could not be converted into a tree.
    #[error("failed to serialize value for masking: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The top-level value has a shape the entry point does not accept.
    #[error("unsupported top-level value: expected {expected}, found {found}")]
    UnsupportedShape {
        expected: &'static str,
        found: NodeKind,
    },

    /// A configured key pattern failed to compile.
    #[error("invalid key pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The input nests deeper than the configured limit.
    #[error("value nests deeper than the limit of {limit} levels")]
    DepthLimitExceeded { limit: usize },
}
