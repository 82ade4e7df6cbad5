//! Secret path normalization.
//!
//! Paths are `/`-delimited segment chains. Leading and trailing separators
//! carry no meaning and are stripped; empty interior segments are rejected.

use crate::error::{PathError, Result};

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Normalize a path by stripping leading and trailing separators.
///
/// The empty path (or a path made only of separators) normalizes to `""`,
/// which addresses the root of a mount.
///
/// # Errors
///
/// Returns `PathError::EmptySegment` if the path contains `//`.
pub fn normalize(path: &str) -> Result<String> {
    let trimmed = path.trim_matches(SEPARATOR);
    if trimmed.split(SEPARATOR).any(str::is_empty) && !trimmed.is_empty() {
        return Err(PathError::EmptySegment(path.to_string()).into());
    }
    Ok(trimmed.to_string())
}

/// Split a path into its segments after normalization.
pub fn segments(path: &str) -> Result<Vec<String>> {
    let normalized = normalize(path)?;
    if normalized.is_empty() {
        return Ok(Vec::new());
    }
    Ok(normalized.split(SEPARATOR).map(str::to_string).collect())
}

/// Join a prefix and a relative path with exactly one separator.
///
/// `join("new", "b")` and `join("new/", "/b")` both give `new/b`; an empty
/// side yields the other side unchanged.
pub fn join(prefix: &str, relative: &str) -> String {
    let prefix = prefix.trim_matches(SEPARATOR);
    let relative = relative.trim_matches(SEPARATOR);
    match (prefix.is_empty(), relative.is_empty()) {
        (true, _) => relative.to_string(),
        (_, true) => prefix.to_string(),
        _ => format!("{}{}{}", prefix, SEPARATOR, relative),
    }
}

/// Check whether `path` equals `base` or lies below it, segment-aligned.
///
/// `app/db` is within `app`, `application` is not.
pub fn is_within(path: &str, base: &str) -> bool {
    let path = path.trim_matches(SEPARATOR);
    let base = base.trim_matches(SEPARATOR);
    if base.is_empty() {
        return true;
    }
    path == base
        || (path.starts_with(base) && path[base.len()..].starts_with(SEPARATOR))
}

/// Strip `base` from the front of `path`, returning the relative remainder.
///
/// Returns `None` when `path` is not within `base`.
pub fn relative_to<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    if !is_within(path, base) {
        return None;
    }
    let path = path.trim_matches(SEPARATOR);
    let base = base.trim_matches(SEPARATOR);
    Some(path[base.len()..].trim_start_matches(SEPARATOR))
}

/// Validate that a path is non-empty after normalization.
///
/// # Errors
///
/// Returns `PathError::Empty` for `""` or `"/"`.
pub fn require_non_empty(path: &str) -> Result<String> {
    let normalized = normalize(path)?;
    if normalized.is_empty() {
        return Err(PathError::Empty.into());
    }
    Ok(normalized)
}
