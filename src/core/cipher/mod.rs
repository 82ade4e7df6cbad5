//! Decryption of encrypted import documents.
//!
//! Import files may be encrypted with age for one or more x25519
//! recipients. The holder of a matching identity file can import them with
//! `--decrypt --private-key <identity-file>`.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Decryptor` trait
//! 2. Add the implementation in a new file next to `age.rs`
//! 3. Re-export from this module

use zeroize::Zeroizing;

use crate::error::Result;

mod age;

pub use self::age::Age;

/// Decryption backend.
pub trait Decryptor {
    /// Backend name for logs and messages.
    fn name(&self) -> &'static str;

    /// Decrypt a ciphertext into plaintext bytes.
    ///
    /// The plaintext is wiped from memory when dropped.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the input is not a valid
    /// ciphertext for any loaded identity.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>>;
}
