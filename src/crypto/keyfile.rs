//! Key bootstrap: load or create the base64-encoded key file.
//!
//! The key file holds the 32-byte vault key as a single line of
//! standard base64.  It is written with owner-only permissions and is
//! never overwritten unless the caller asks for it.

use std::fs;
use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroizing;

use super::key::{EncryptionKey, KEY_LEN};
use crate::errors::{CredVaultError, Result};

/// Environment variable that may carry the base64 key directly.
pub const KEY_ENV_VAR: &str = "CREDVAULT_KEY";

/// Generate a fresh random key from the OS CSPRNG.
pub fn generate_key() -> Result<EncryptionKey> {
    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    OsRng
        .try_fill_bytes(&mut bytes[..])
        .map_err(|e| CredVaultError::RandomSource(e.to_string()))?;
    Ok(EncryptionKey::new(*bytes))
}

/// Generate a new key and write it to `path` as base64.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn generate_keyfile(path: &Path, force: bool) -> Result<EncryptionKey> {
    if path.exists() && !force {
        return Err(CredVaultError::KeyFile(format!(
            "key file already exists at {}",
            path.display()
        )));
    }

    let key = generate_key()?;
    let encoded = Zeroizing::new(BASE64.encode(key.as_bytes()));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                CredVaultError::KeyFile(format!("cannot create key file directory: {e}"))
            })?;
        }
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|e| CredVaultError::KeyFile(format!("failed to open key file: {e}")))?;
    file.write_all(encoded.as_bytes())
        .and_then(|()| file.write_all(b"\n"))
        .and_then(|()| file.sync_all())
        .map_err(|e| CredVaultError::KeyFile(format!("failed to write key file: {e}")))?;

    // `mode` only applies on creation; tighten a pre-existing file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            CredVaultError::KeyFile(format!("failed to set key file permissions: {e}"))
        })?;
    }

    tracing::info!(path = %path.display(), "key file generated");
    Ok(key)
}

/// Load the key from a base64 key file.
pub fn load_keyfile(path: &Path) -> Result<EncryptionKey> {
    if !path.exists() {
        return Err(CredVaultError::KeyFile(format!(
            "key file not found at {} (run `credvault keygen` to create one)",
            path.display()
        )));
    }

    let contents = Zeroizing::new(
        fs::read_to_string(path)
            .map_err(|e| CredVaultError::KeyFile(format!("failed to read key file: {e}")))?,
    );
    let key = EncryptionKey::from_base64(&contents)?;

    tracing::debug!(path = %path.display(), "key file loaded");
    Ok(key)
}

/// Resolve the key: `CREDVAULT_KEY` wins when set and non-empty,
/// otherwise the key file at `path` is read.
pub fn resolve_key(path: &Path) -> Result<EncryptionKey> {
    if let Ok(encoded) = std::env::var(KEY_ENV_VAR) {
        let encoded = Zeroizing::new(encoded);
        if !encoded.trim().is_empty() {
            tracing::debug!("using key from {KEY_ENV_VAR}");
            return EncryptionKey::from_base64(&encoded);
        }
    }
    load_keyfile(path)
}
