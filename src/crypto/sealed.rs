//! Sealed blobs and their text encoding.
//!
//! An `EncryptedBlob` is the ciphertext (with its 16-byte GCM tag) plus
//! the 12-byte nonce that produced it.  The two are only ever stored
//! together, as one string:
//!
//! ```text
//! <base64(ciphertext)>|<base64(nonce)>
//! ```
//!
//! This module is the only place that knows about the `|` delimiter.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{CredVaultError, Result};

/// Size of the AES-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Separates the ciphertext and nonce segments.  Not part of the
/// base64 alphabet.
pub const DELIMITER: char = '|';

/// Ciphertext plus the nonce that produced it.
///
/// Fields are private so every blob in memory is well-shaped: a
/// 12-byte nonce and at least a tag's worth of ciphertext.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    ciphertext: Vec<u8>,
    nonce: [u8; NONCE_LEN],
}

impl EncryptedBlob {
    /// Assemble a blob from raw parts, validating their shape.
    pub fn from_parts(ciphertext: Vec<u8>, nonce: &[u8]) -> Result<Self> {
        let nonce: [u8; NONCE_LEN] = nonce.try_into().map_err(|_| {
            CredVaultError::MalformedInput(format!(
                "nonce must be {NONCE_LEN} bytes, got {}",
                nonce.len()
            ))
        })?;
        if ciphertext.len() < TAG_LEN {
            return Err(CredVaultError::MalformedInput(format!(
                "ciphertext must be at least {TAG_LEN} bytes, got {}",
                ciphertext.len()
            )));
        }
        Ok(Self { ciphertext, nonce })
    }

    /// Ciphertext including the trailing authentication tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Encode as `<base64 ciphertext>|<base64 nonce>`.
    pub fn encode(&self) -> String {
        format!(
            "{}{DELIMITER}{}",
            BASE64.encode(&self.ciphertext),
            BASE64.encode(self.nonce)
        )
    }

    /// Parse the delimited encoding produced by [`EncryptedBlob::encode`].
    ///
    /// Exactly one delimiter is accepted.  Both segments must be valid
    /// standard base64 and decode to a well-shaped blob.
    pub fn decode(encoded: &str) -> Result<Self> {
        let (ct_b64, nonce_b64) = encoded.split_once(DELIMITER).ok_or_else(|| {
            CredVaultError::MalformedInput(format!("missing '{DELIMITER}' delimiter"))
        })?;
        if nonce_b64.contains(DELIMITER) {
            return Err(CredVaultError::MalformedInput(format!(
                "more than one '{DELIMITER}' delimiter"
            )));
        }

        let ciphertext = BASE64
            .decode(ct_b64)
            .map_err(|e| CredVaultError::MalformedInput(format!("ciphertext segment: {e}")))?;
        let nonce = BASE64
            .decode(nonce_b64)
            .map_err(|e| CredVaultError::MalformedInput(format!("nonce segment: {e}")))?;

        Self::from_parts(ciphertext, &nonce)
    }
}

impl fmt::Display for EncryptedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for EncryptedBlob {
    type Err = CredVaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

// Ciphertext stays out of debug output so it never lands in logs.
impl fmt::Debug for EncryptedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedBlob")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EncryptedBlob {
        EncryptedBlob::from_parts(vec![0x5A; 23], &[9u8; NONCE_LEN]).unwrap()
    }

    #[test]
    fn encode_has_single_delimiter() {
        let encoded = sample().encode();
        assert_eq!(encoded.matches(DELIMITER).count(), 1);
    }

    #[test]
    fn decode_inverts_encode() {
        let blob = sample();
        let parsed: EncryptedBlob = blob.to_string().parse().unwrap();
        assert_eq!(parsed, blob);
    }

    #[test]
    fn decode_rejects_missing_delimiter() {
        let err = EncryptedBlob::decode("AAAAAAAAAAAAAAAAAAAAAA==").unwrap_err();
        assert!(matches!(err, CredVaultError::MalformedInput(_)));
    }

    #[test]
    fn decode_rejects_extra_delimiters() {
        let encoded = format!("{}|", sample().encode());
        assert!(matches!(
            EncryptedBlob::decode(&encoded),
            Err(CredVaultError::MalformedInput(_))
        ));

        let encoded = format!("|{}", sample().encode());
        assert!(matches!(
            EncryptedBlob::decode(&encoded),
            Err(CredVaultError::MalformedInput(_))
        ));
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert!(matches!(
            EncryptedBlob::decode("not*base64|AAAAAAAAAAAAAAAA"),
            Err(CredVaultError::MalformedInput(_))
        ));
    }

    #[test]
    fn decode_rejects_wrong_nonce_length() {
        let ct = BASE64.encode([1u8; 20]);
        for len in [0, 8, 11, 13, 16] {
            let encoded = format!("{ct}|{}", BASE64.encode(vec![2u8; len]));
            assert!(matches!(
                EncryptedBlob::decode(&encoded),
                Err(CredVaultError::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn from_parts_rejects_ciphertext_shorter_than_tag() {
        let err = EncryptedBlob::from_parts(vec![0u8; TAG_LEN - 1], &[0u8; NONCE_LEN]).unwrap_err();
        assert!(matches!(err, CredVaultError::MalformedInput(_)));
    }

    #[test]
    fn debug_hides_ciphertext_bytes() {
        let shown = format!("{:?}", sample());
        assert!(shown.contains("ciphertext_len"));
        assert!(!shown.contains("90"));
    }
}
