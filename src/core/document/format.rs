//! Document formats.
//!
//! Parsing and serialization are delegated to `serde_yaml` and `serde_json`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::trace;

use super::SecretDocument;
use crate::error::{ConfigError, DocumentError, Result};

/// On-disk representation of a secret document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// Pick a format from a file extension: `.json` is JSON, anything else YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

/// Parse a document. The root must be a mapping; an empty or null input is
/// an empty document.
///
/// # Errors
///
/// Returns `DocumentError::Parse` for malformed input and
/// `DocumentError::NotAMapping` when the root is a scalar or sequence.
pub fn parse(bytes: &[u8], format: Format) -> Result<SecretDocument> {
    trace!(len = bytes.len(), %format, "parsing document");

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(SecretDocument::empty());
    }

    let value: serde_json::Value = match format {
        Format::Yaml => {
            serde_yaml::from_slice(bytes).map_err(|e| DocumentError::Parse(e.to_string()))?
        }
        Format::Json => {
            serde_json::from_slice(bytes).map_err(|e| DocumentError::Parse(e.to_string()))?
        }
    };

    match value {
        serde_json::Value::Null => Ok(SecretDocument::empty()),
        serde_json::Value::Object(_) => Ok(SecretDocument::from_value(value)),
        _ => Err(DocumentError::NotAMapping.into()),
    }
}

/// Serialize a document.
///
/// # Errors
///
/// Returns `DocumentError::Serialize` if the serializer rejects the value.
pub fn serialize(document: &SecretDocument, format: Format) -> Result<Vec<u8>> {
    let bytes = match format {
        Format::Yaml => serde_yaml::to_string(document)
            .map(String::into_bytes)
            .map_err(|e| DocumentError::Serialize(e.to_string()))?,
        Format::Json => {
            let mut out = serde_json::to_vec_pretty(document)
                .map_err(|e| DocumentError::Serialize(e.to_string()))?;
            out.push(b'\n');
            out
        }
    };
    trace!(len = bytes.len(), %format, "serialized document");
    Ok(bytes)
}
