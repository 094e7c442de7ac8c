//! AES-256-GCM authenticated encryption under one fixed key.
//!
//! Every call to [`AuthenticatedCipher::seal`] draws a fresh random
//! 12-byte nonce from the operating system.  If the OS cannot supply
//! one, sealing fails instead of encrypting; a repeated nonce under the
//! same key would expose both plaintexts and allow forgeries.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroize;

use super::key::EncryptionKey;
use super::sealed::{EncryptedBlob, NONCE_LEN};
use crate::errors::{CredVaultError, Result};

/// Seals and opens byte payloads under a single key.
///
/// Holds no mutable state, so one instance can be shared across threads.
pub struct AuthenticatedCipher {
    aead: Aes256Gcm,
}

impl AuthenticatedCipher {
    /// Build a cipher from an already validated key.
    pub fn new(key: &EncryptionKey) -> Self {
        Self {
            aead: Aes256Gcm::new(key.as_bytes().into()),
        }
    }

    /// Build a cipher from raw key bytes.
    ///
    /// Fails with `InvalidKey` unless `key` is exactly 32 bytes.
    pub fn from_slice(key: &[u8]) -> Result<Self> {
        let key = EncryptionKey::from_slice(key)?;
        Ok(Self::new(&key))
    }

    /// Encrypt and authenticate `plaintext` with a fresh random nonce.
    pub fn seal(&self, plaintext: &[u8]) -> Result<EncryptedBlob> {
        let nonce = fresh_nonce()?;

        let ciphertext = self
            .aead
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| CredVaultError::Encryption("AES-256-GCM seal failed".into()))?;

        EncryptedBlob::from_parts(ciphertext, &nonce)
    }

    /// Verify and decrypt a blob.
    ///
    /// Any tag mismatch (wrong key, altered ciphertext, altered nonce)
    /// returns `Authentication` and no plaintext at all.
    pub fn open(&self, blob: &EncryptedBlob) -> Result<Vec<u8>> {
        self.aead
            .decrypt(Nonce::from_slice(blob.nonce()), blob.ciphertext())
            .map_err(|_| CredVaultError::Authentication)
    }

    /// Seal a single text field into its storage encoding
    /// (`<base64 ciphertext>|<base64 nonce>`).
    pub fn seal_field(&self, plaintext: &str) -> Result<String> {
        Ok(self.seal(plaintext.as_bytes())?.encode())
    }

    /// Decode and open a field produced by [`AuthenticatedCipher::seal_field`].
    pub fn open_field(&self, encoded: &str) -> Result<String> {
        let blob = EncryptedBlob::decode(encoded)?;
        let plaintext = self.open(&blob)?;

        // On error, wipe the bytes carried inside the UTF-8 error.
        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            CredVaultError::Deserialization("sealed field is not valid UTF-8".into())
        })
    }
}

impl fmt::Debug for AuthenticatedCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Draw a nonce from the OS CSPRNG, failing closed.
fn fresh_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| CredVaultError::RandomSource(e.to_string()))?;
    Ok(nonce)
}
