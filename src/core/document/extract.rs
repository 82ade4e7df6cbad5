//! Branch extraction.

use std::collections::BTreeMap;

use tracing::debug;

use super::SecretDocument;
use crate::core::path;
use crate::error::{DocumentError, Result};

/// Isolate the branch of `document` addressed by `branch_path`.
///
/// Walks one segment at a time from the root. Descending stops early when a
/// segment names a leaf: the result is then `{segment: leaf}` and any
/// remaining segments are ignored. The empty path returns the whole document.
///
/// # Errors
///
/// Returns `DocumentError::PathNotFound` if a segment is missing at its
/// level, and `PathError::EmptySegment` for malformed paths.
pub fn extract(document: &SecretDocument, branch_path: &str) -> Result<SecretDocument> {
    let segments = path::segments(branch_path)?;
    let not_found = || DocumentError::PathNotFound(branch_path.to_string());

    let mut current = document;
    for (i, segment) in segments.iter().enumerate() {
        let SecretDocument::Node(children) = current else {
            return Err(not_found().into());
        };
        match children.get(segment) {
            Some(child @ SecretDocument::Node(_)) => current = child,
            Some(leaf @ SecretDocument::Leaf(_)) => {
                let ignored = &segments[i + 1..];
                if !ignored.is_empty() {
                    debug!(
                        segment = %segment,
                        ignored = %ignored.join("/"),
                        "extraction reached a secret value before the end of the path"
                    );
                }
                let mut wrapper = BTreeMap::new();
                wrapper.insert(segment.clone(), leaf.clone());
                return Ok(SecretDocument::Node(wrapper));
            }
            None => return Err(not_found().into()),
        }
    }

    Ok(current.clone())
}
