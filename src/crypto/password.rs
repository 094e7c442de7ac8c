//! Random password generation.
//!
//! Characters are drawn from [`ALPHABET`] using bytes from the OS
//! CSPRNG.  Rejection sampling keeps the draw uniform: a byte is only
//! accepted when it falls below the largest multiple of the alphabet
//! size that fits in a byte, so `byte % ALPHABET.len()` hits every
//! symbol equally often.

use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroizing;

use crate::errors::{CredVaultError, Result};

/// Every symbol a generated password may contain (88 symbols).
pub const ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Upper bound on a single generated password.
pub const MAX_PASSWORD_LEN: usize = 4096;

/// Bytes at or above this value are discarded (176 for 88 symbols).
const ACCEPT_BELOW: usize = (u8::MAX as usize + 1) / ALPHABET.len() * ALPHABET.len();

/// Generate a password of exactly `length` characters.
///
/// Fails with `InvalidPasswordLength` for 0 or anything above
/// [`MAX_PASSWORD_LEN`], and with `RandomSource` if the OS random
/// source errors.  There is no fallback generator.
pub fn generate(length: usize) -> Result<String> {
    if length == 0 || length > MAX_PASSWORD_LEN {
        return Err(CredVaultError::InvalidPasswordLength {
            got: length,
            max: MAX_PASSWORD_LEN,
        });
    }

    let mut password = Zeroizing::new(Vec::with_capacity(length));
    // Roughly 69% of bytes are accepted, so over-draw a little per batch.
    let mut batch = Zeroizing::new(vec![0u8; length + length / 2 + 8]);

    while password.len() < length {
        OsRng
            .try_fill_bytes(&mut batch)
            .map_err(|e| CredVaultError::RandomSource(e.to_string()))?;

        for &byte in batch.iter() {
            if usize::from(byte) >= ACCEPT_BELOW {
                continue;
            }
            password.push(ALPHABET[usize::from(byte) % ALPHABET.len()]);
            if password.len() == length {
                break;
            }
        }
    }

    // ALPHABET is pure ASCII.
    Ok(password.iter().map(|&b| char::from(b)).collect())
}
