//! Flattening a document into addressable leaf entries.

use serde::Serialize;
use serde_json::Value;

use super::SecretDocument;
use crate::core::path;

/// A leaf value and its path relative to the flatten root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafEntry {
    pub path: String,
    pub value: Value,
}

impl LeafEntry {
    pub fn new(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }
}

/// Flatten every leaf below `document` into `(path, value)` entries.
///
/// Depth-first; entry order follows the document's key order and carries no
/// meaning. A bare leaf root has no key to address it and yields nothing.
pub fn flatten(document: &SecretDocument) -> Vec<LeafEntry> {
    let mut entries = Vec::with_capacity(document.leaf_count());
    if let SecretDocument::Node(_) = document {
        walk("", document, &mut entries);
    }
    entries
}

fn walk(prefix: &str, document: &SecretDocument, out: &mut Vec<LeafEntry>) {
    match document {
        SecretDocument::Leaf(value) => out.push(LeafEntry::new(prefix, value.clone())),
        SecretDocument::Node(children) => {
            for (key, child) in children {
                walk(&path::join(prefix, key), child, out);
            }
        }
    }
}

/// Paths of every node below `document`, parents before children.
///
/// Leaves are not listed; a document holding only leaves yields nothing.
pub fn node_paths(document: &SecretDocument) -> Vec<String> {
    let mut paths = Vec::new();
    collect_nodes("", document, &mut paths);
    paths
}

fn collect_nodes(prefix: &str, document: &SecretDocument, out: &mut Vec<String>) {
    if let SecretDocument::Node(children) = document {
        for (key, child) in children {
            if let SecretDocument::Node(_) = child {
                let child_path = path::join(prefix, key);
                out.push(child_path.clone());
                collect_nodes(&child_path, child, out);
            }
        }
    }
}
