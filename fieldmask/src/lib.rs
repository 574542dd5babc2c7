//! Rule-based masking of sensitive fields in structured data.
//!
//! A [`Masker`] holds an immutable set of key rules and produces masked copies
//! of structured values so they can be logged or displayed without leaking
//! secrets or unbounded payloads. Rules are evaluated per key, in a fixed order:
//!
//! 1. **never mask**: the value passes through untouched, nested structure included.
//! 2. **always mask**: the value is replaced with [`MASK_PLACEHOLDER`] (`"***"`).
//! 3. **custom rules**: the first matching [`MaskHandler`] rewrites the value.
//! 4. objects and arrays are walked recursively.
//! 5. string leaves longer than `max_length` runes are truncated.
//!
//! Array elements are matched by their zero-based index rendered as a decimal
//! string, so a pattern such as `^0$` selects the first element of every array.
//!
//! What this crate does:
//! - converts any `Serialize` value into a generic [`Node`] tree
//! - masks trees and flat multi-value maps (e.g. query parameters)
//! - provides integrations behind feature flags (`slog`, `tracing`)
//!
//! What it does not do:
//! - perform I/O or logging
//! - parse or validate structured text
//! - modify its input in place
//!
//! # Example
//!
//! ```rust
//! use fieldmask::Masker;
//! use regex::Regex;
//! use serde_json::json;
//!
//! let masker = Masker::builder()
//!     .always_mask(Regex::new("password|token").unwrap())
//!     .max_length(8)
//!     .build();
//!
//! let masked = masker
//!     .mask(&json!({"user": "alice", "password": "hunter2", "bio": "a very long biography"}))
//!     .unwrap();
//!
//! assert_eq!(
//!     serde_json::Value::from(masked),
//!     json!({"user": "alice", "password": "***", "bio": "a very l ... (13 more runes)"})
//! );
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

mod adapter;
mod builder;
mod config;
mod error;
mod handler;
mod masker;
mod matcher;
mod multimap;
mod tree;
mod truncate;

#[cfg(feature = "slog")]
pub mod slog;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use adapter::ToTree;
pub use builder::MaskerBuilder;
pub use config::{CustomRuleConfig, MaskConfig};
pub use error::MaskError;
pub use handler::{MASK_CHAR, MaskHandler, TextPolicy};
pub use masker::{MASK_PLACEHOLDER, Masker};
pub use matcher::{KeyList, KeyMatcher};
pub use multimap::{MaskedMultiMap, MaskedValues};
pub use tree::{Node, NodeKind, Scalar, Shape};
pub use truncate::truncate;
