//! The single long-lived AES-256 key.
//!
//! `EncryptionKey` is constructed once by the bootstrap layer from
//! validated bytes and then lent by reference to the cipher.  It has no
//! default constructor, cannot be cloned or serialized, and wipes its
//! memory when dropped.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{CredVaultError, Result};

/// Length of an AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// A 32-byte symmetric key, zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_LEN],
}

impl EncryptionKey {
    /// Wrap an exact 32-byte array.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Validate and copy raw key bytes.
    ///
    /// Fails with `InvalidKey` (reporting only the length) when the
    /// slice is not exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CredVaultError::InvalidKey(bytes.len()))?;
        Ok(Self { bytes })
    }

    /// Decode a standard base64 string (surrounding whitespace ignored).
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            BASE64
                .decode(encoded.trim())
                .map_err(|e| CredVaultError::KeyFile(format!("key is not valid base64: {e}")))?,
        );
        Self::from_slice(&decoded)
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
