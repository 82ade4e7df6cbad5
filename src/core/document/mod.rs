//! Secret documents.
//!
//! A [`SecretDocument`] mirrors the hierarchical namespace of a secret store:
//! every mapping is a [`SecretDocument::Node`] and every other value is an
//! opaque [`SecretDocument::Leaf`]. The tag is decided once, when a document
//! is built or parsed, so navigation never has to inspect value types.

mod extract;
mod flatten;
pub mod format;

pub use extract::extract;
pub use flatten::{flatten, node_paths, LeafEntry};
pub use format::Format;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::path;
use crate::error::{Result, StoreError};

/// A secret tree: either an opaque leaf value or a node of named children.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretDocument {
    /// Terminal secret value, never inspected.
    Leaf(Value),
    /// Named children, each a leaf or a node.
    Node(BTreeMap<String, SecretDocument>),
}

impl Default for SecretDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl SecretDocument {
    /// An empty node.
    pub fn empty() -> Self {
        Self::Node(BTreeMap::new())
    }

    /// Build a document from a JSON value, turning every object into a node.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Node(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_value(v)))
                    .collect(),
            ),
            other => Self::Leaf(other),
        }
    }

    /// Convert back into a plain JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(value) => value.clone(),
            Self::Node(children) => Value::Object(
                children
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }

    /// `true` for a node without children. A leaf is never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Node(children) if children.is_empty())
    }

    /// `true` if this is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Child lookup; `None` for leaves and missing keys.
    pub fn get(&self, key: &str) -> Option<&SecretDocument> {
        match self {
            Self::Node(children) => children.get(key),
            Self::Leaf(_) => None,
        }
    }

    /// Number of leaves reachable from this document.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node(children) => children.values().map(Self::leaf_count).sum(),
        }
    }

    /// Insert a leaf at a `/`-delimited path, creating nodes along the way.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if a leaf already sits where a node is
    /// needed (or the other way round), or if `self` is a leaf.
    pub fn insert_leaf(&mut self, leaf_path: &str, value: Value) -> Result<()> {
        let segments = path::segments(leaf_path)?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(StoreError::Conflict {
                path: leaf_path.to_string(),
                reason: "cannot replace the document root with a leaf".to_string(),
            }
            .into());
        };

        let conflict = |reason: &str| StoreError::Conflict {
            path: leaf_path.to_string(),
            reason: reason.to_string(),
        };

        let mut current = self;
        for segment in parents {
            let Self::Node(children) = current else {
                return Err(conflict("a parent path holds a secret value").into());
            };
            current = children.entry(segment.clone()).or_insert_with(Self::empty);
        }

        let Self::Node(children) = current else {
            return Err(conflict("a parent path holds a secret value").into());
        };
        if matches!(children.get(last), Some(Self::Node(_))) {
            return Err(conflict("path holds nested secrets").into());
        }
        children.insert(last.clone(), Self::Leaf(value));
        Ok(())
    }
}

impl Serialize for SecretDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => value.serialize(serializer),
            Self::Node(children) => children.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SecretDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Build a [`SecretDocument`] from JSON-like syntax.
///
/// ```
/// let doc = vaultshift::doc!({"a": {"b": 1}});
/// assert_eq!(doc.leaf_count(), 1);
/// ```
#[macro_export]
macro_rules! doc {
    ($($json:tt)+) => {
        $crate::core::document::SecretDocument::from_value(::serde_json::json!($($json)+))
    };
}
