//! Adapters for emitting masked values through `tracing`.
//!
//! Masked values are recorded as display fields holding compact JSON text,
//! which works with any subscriber.
//!
//! # Example
//!
//! ```ignore
//! use fieldmask::tracing::TracingMaskedExt;
//!
//! tracing::info!(body = %body.tracing_masked(&masker), "request received");
//! ```

use tracing::field::{DisplayValue, display};

use crate::{adapter::ToTree, masker::Masker, multimap::MaskedMultiMap};

/// Extension trait for logging masked values as `tracing` display fields.
pub trait TracingMaskedExt: ToTree {
    /// Masks `self` with `masker` and wraps the JSON text for `tracing`.
    ///
    /// If masking fails, the text is `"Failed to mask value: <error>"`.
    fn tracing_masked(&self, masker: &Masker) -> DisplayValue<String> {
        let text = match masker.mask(self) {
            Ok(masked) => masked.to_string(),
            Err(err) => format!("Failed to mask value: {err}"),
        };
        display(text)
    }
}

impl<T> TracingMaskedExt for T where T: ToTree + ?Sized {}

/// Wraps a masked multi-map as a `tracing` display field holding JSON text.
pub fn multi_map_display(masked: &MaskedMultiMap) -> DisplayValue<String> {
    let text = serde_json::to_string(masked)
        .unwrap_or_else(|err| format!("Failed to render masked map: {err}"));
    display(text)
}
