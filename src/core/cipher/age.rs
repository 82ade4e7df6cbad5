//! Age decryption backend.
//!
//! Reads armored or binary age files with x25519 identities.

use std::io::Read;
use std::path::Path;

use ::age::x25519;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::Decryptor;
use crate::error::{CipherError, Result};

/// Age decryption with one or more x25519 identities.
pub struct Age {
    identities: Vec<x25519::Identity>,
}

impl Age {
    /// Decrypt with a single identity.
    pub fn new(identity: x25519::Identity) -> Self {
        Self {
            identities: vec![identity],
        }
    }

    /// Load every `AGE-SECRET-KEY-` line from an identity file.
    ///
    /// Blank lines and `#` comments (as written by `age-keygen`) are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::NoIdentity` if the file holds no key, and
    /// `CipherError::InvalidIdentity` if a key line does not parse.
    pub fn from_identity_file(path: &Path) -> Result<Self> {
        let contents = Zeroizing::new(std::fs::read_to_string(path)?);

        let identities = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| {
                line.parse::<x25519::Identity>()
                    .map_err(|e: &str| CipherError::InvalidIdentity(e.to_string()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if identities.is_empty() {
            return Err(CipherError::NoIdentity(path.display().to_string()).into());
        }

        debug!(path = %path.display(), count = identities.len(), "loaded age identities");
        Ok(Self { identities })
    }
}

impl Decryptor for Age {
    fn name(&self) -> &'static str {
        "age"
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let reader = ::age::armor::ArmoredReader::new(ciphertext);
        let decryptor = ::age::Decryptor::new(reader)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut reader = decryptor
            .decrypt(self.identities.iter().map(|i| i as &dyn ::age::Identity))
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut plaintext = Zeroizing::new(Vec::new());
        reader
            .read_to_end(&mut plaintext)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(plaintext)
    }
}
