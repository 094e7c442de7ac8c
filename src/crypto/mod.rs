//! Cryptographic primitives for credvault.
//!
//! This module provides:
//! - The owned 32-byte vault key (`key`)
//! - AES-256-GCM sealing and opening (`cipher`)
//! - The `<ciphertext>|<nonce>` sealed-string encoding (`sealed`)
//! - Uniform random password generation (`password`)
//! - Key file bootstrap (`keyfile`)

pub mod cipher;
pub mod key;
pub mod keyfile;
pub mod password;
pub mod sealed;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{AuthenticatedCipher, EncryptedBlob, EncryptionKey};
pub use cipher::AuthenticatedCipher;
pub use key::{EncryptionKey, KEY_LEN};
pub use keyfile::{generate_keyfile, load_keyfile, resolve_key};
pub use password::{generate as generate_password, ALPHABET};
pub use sealed::{EncryptedBlob, NONCE_LEN, TAG_LEN};
