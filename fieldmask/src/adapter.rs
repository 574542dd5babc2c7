//! Conversion of typed values into the generic tree.

use serde::Serialize;

use crate::{error::MaskError, tree::Node};

/// Converts a value into a [`Node`] tree.
///
/// Every `Serialize` type gets an implementation that is equivalent to a JSON
/// encode/decode round trip: struct fields become object keys under their
/// serialized names, sequences become arrays, and `None` becomes `null`.
pub trait ToTree {
    fn to_tree(&self) -> Result<Node, MaskError>;
}

impl<T> ToTree for T
where
    T: Serialize + ?Sized,
{
    fn to_tree(&self) -> Result<Node, MaskError> {
        Ok(Node::from(serde_json::to_value(self)?))
    }
}
