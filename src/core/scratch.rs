//! Per-invocation scratch artifact.
//!
//! The exported subtree is round-tripped through a serialized document on
//! disk before extraction. The file is uniquely named, private to the user,
//! and removed when the [`Scratch`] is dropped, including on early returns.

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::constants;
use crate::core::document::{format, Format, SecretDocument};
use crate::error::{Result, TransferError};

/// A uniquely named temporary document file.
#[derive(Debug)]
pub struct Scratch {
    file: NamedTempFile,
    format: Format,
}

impl Scratch {
    /// Create a scratch file in the system temp directory.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::Scratch` if the file cannot be created.
    pub fn new(format: Format) -> Result<Self> {
        Self::create(None, format)
    }

    /// Create a scratch file inside `dir`.
    pub fn new_in(dir: &Path, format: Format) -> Result<Self> {
        Self::create(Some(dir), format)
    }

    fn create(dir: Option<&Path>, format: Format) -> Result<Self> {
        let suffix = format!(".{}", format.name());
        let mut builder = tempfile::Builder::new();
        builder.prefix(constants::SCRATCH_PREFIX).suffix(&suffix);
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(TransferError::Scratch)?;

        debug!(path = %file.path().display(), "created scratch file");
        Ok(Self { file, format })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Serialize `document` into the scratch file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Serialize` or `TransferError::Scratch`.
    pub fn store(&self, document: &SecretDocument) -> Result<()> {
        let bytes = format::serialize(document, self.format)?;
        fs::write(self.file.path(), bytes).map_err(TransferError::Scratch)?;
        Ok(())
    }

    /// Parse the scratch file back into a document.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::Scratch` or `DocumentError::Parse`.
    pub fn load(&self) -> Result<SecretDocument> {
        let bytes = fs::read(self.file.path()).map_err(TransferError::Scratch)?;
        format::parse(&bytes, self.format)
    }
}

/// Round-trip `document` through a fresh scratch file.
///
/// The reloaded document must equal the original: a leaf holding a mapping
/// comes back as a node, which would split or drop secrets downstream.
///
/// # Errors
///
/// Returns `TransferError::LossyRoundTrip` naming `display_path` when the
/// reloaded document differs, plus the errors of [`Scratch`].
pub fn round_trip(document: &SecretDocument, display_path: &str) -> Result<SecretDocument> {
    let scratch = Scratch::new(Format::Yaml)?;
    scratch.store(document)?;
    let reloaded = scratch.load()?;
    if &reloaded != document {
        return Err(TransferError::LossyRoundTrip(display_path.to_string()).into());
    }
    Ok(reloaded)
}
