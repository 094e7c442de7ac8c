//! Encrypted vault container file.
//!
//! A vault file holds exactly one sealed string:
//!
//! ```text
//! <base64(AES-256-GCM ciphertext of the vault JSON)>|<base64(nonce)>
//! ```
//!
//! The JSON payload is `{"version":1,"entries":[...]}` with fields in
//! declaration order, so a save/load round-trip reproduces the same
//! plaintext bytes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use super::record::{Vault, VAULT_VERSION};
use crate::crypto::{AuthenticatedCipher, EncryptedBlob, EncryptionKey};
use crate::errors::{CredVaultError, Result};

/// Seal `vault` under `key` and write it to `path` atomically.
pub fn save(vault: &Vault, key: &EncryptionKey, path: &Path) -> Result<()> {
    save_with(vault, &AuthenticatedCipher::new(key), path)
}

/// Read and open the vault at `path` with `key`.
///
/// All-or-nothing: either the full vault is returned or an error.
pub fn load(key: &EncryptionKey, path: &Path) -> Result<Vault> {
    load_with(&AuthenticatedCipher::new(key), path)
}

/// Like [`save`], reusing an existing cipher.
///
/// 1. Serialize the vault to JSON.
/// 2. Seal the JSON and encode it as a sealed string.
/// 3. Write to an owner-only temp file in the same directory and fsync.
/// 4. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file; if any
/// step fails the previous vault file is left untouched.
pub fn save_with(vault: &Vault, cipher: &AuthenticatedCipher, path: &Path) -> Result<()> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(vault).map_err(|e| CredVaultError::Serialization(e.to_string()))?,
    );
    let encoded = cipher.seal(&plaintext)?.encode();

    let tmp_path = temp_path(path);
    if let Err(e) = write_private(&tmp_path, encoded.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    sync_parent(path)?;

    tracing::debug!(path = %path.display(), records = vault.len(), "vault saved");
    Ok(())
}

/// Like [`load`], reusing an existing cipher.
pub fn load_with(cipher: &AuthenticatedCipher, path: &Path) -> Result<Vault> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CredVaultError::VaultNotFound(path.to_path_buf()));
        }
        // Binary garbage is a format problem, not an IO one.
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            return Err(CredVaultError::MalformedInput(
                "vault file is not valid text".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    // Tolerate a trailing newline added by an editor or `echo`.
    let blob = EncryptedBlob::decode(contents.trim_end())?;

    // Wrong key and tampered file both surface as `Authentication`.
    let plaintext = Zeroizing::new(cipher.open(&blob)?);

    let vault: Vault = serde_json::from_slice(&plaintext)
        .map_err(|e| CredVaultError::Deserialization(format!("vault JSON: {e}")))?;
    if vault.version() != VAULT_VERSION {
        return Err(CredVaultError::Deserialization(format!(
            "unsupported vault version {}, expected {VAULT_VERSION}",
            vault.version()
        )));
    }
    vault
        .validate()
        .map_err(|e| CredVaultError::Deserialization(e.to_string()))?;

    tracing::debug!(path = %path.display(), records = vault.len(), "vault loaded");
    Ok(vault)
}

/// Sibling temp path: `<dir>/.<name>.tmp`, so the rename stays on one
/// filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

/// Create `path` fresh with mode 0600 on Unix, write `data` and flush
/// it to disk.
///
/// A leftover temp file (or a symlink planted there) is unlinked first so
/// the new file never inherits foreign permissions or a foreign target.
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed stale temp file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

/// Flush the directory entry created by the rename.
#[cfg(unix)]
fn sync_parent(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::SecretRecord;
    use tempfile::TempDir;

    fn key() -> EncryptionKey {
        EncryptionKey::new([0x42; 32])
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let tmp = temp_path(Path::new("/data/creds.vault"));
        assert_eq!(tmp, PathBuf::from("/data/.creds.vault.tmp"));
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.vault");
        save(&Vault::new(), &key(), &path).unwrap();

        assert!(path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn file_is_single_sealed_string() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.vault");
        let mut vault = Vault::new();
        vault
            .insert(SecretRecord::new("github", "alice", "hunter2", None).unwrap())
            .unwrap();
        save(&vault, &key(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches('|').count(), 1);
        assert!(!contents.contains("hunter2"));
        assert!(!contents.contains("github"));
    }

    #[test]
    fn trailing_newline_is_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.vault");
        save(&Vault::new(), &key(), &path).unwrap();

        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push('\n');
        fs::write(&path, contents).unwrap();

        assert!(load(&key(), &path).unwrap().is_empty());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.vault");
        let cipher = AuthenticatedCipher::new(&key());
        let sealed = cipher
            .seal(br#"{"version":99,"entries":[]}"#)
            .unwrap()
            .encode();
        fs::write(&path, sealed).unwrap();

        assert!(matches!(
            load(&key(), &path),
            Err(CredVaultError::Deserialization(_))
        ));
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.vault");
        save(&Vault::new(), &key(), &path).unwrap();
        let before = fs::read(&path).unwrap();

        // A directory squatting on the temp path makes the write fail.
        fs::create_dir(temp_path(&path)).unwrap();
        assert!(save(&Vault::new(), &key(), &path).is_err());

        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn stale_temp_file_does_not_leak_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.vault");
        let stale = temp_path(&path);
        fs::write(&stale, b"leftover").unwrap();
        fs::set_permissions(&stale, fs::Permissions::from_mode(0o644)).unwrap();

        save(&Vault::new(), &key(), &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!stale.exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_at_temp_path_is_not_followed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.vault");
        let target = dir.path().join("elsewhere");
        fs::write(&target, b"untouched").unwrap();
        std::os::unix::fs::symlink(&target, temp_path(&path)).unwrap();

        save(&Vault::new(), &key(), &path).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"untouched");
        assert!(load(&key(), &path).unwrap().is_empty());
    }

    #[test]
    fn blank_service_in_payload_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.vault");
        let cipher = AuthenticatedCipher::new(&key());
        let payload = br#"{"version":1,"entries":[{"service":"  ","username":"alice","secret":"x","created_at":"2024-01-01T00:00:00Z"}]}"#;
        fs::write(&path, cipher.seal(payload).unwrap().encode()).unwrap();

        assert!(matches!(
            load(&key(), &path),
            Err(CredVaultError::Deserialization(_))
        ));
    }

    #[test]
    fn duplicate_pair_in_payload_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.vault");
        let cipher = AuthenticatedCipher::new(&key());
        let entry = r#"{"service":"github","username":"alice","secret":"x","created_at":"2024-01-01T00:00:00Z"}"#;
        let payload = format!(r#"{{"version":1,"entries":[{entry},{entry}]}}"#);
        fs::write(&path, cipher.seal(payload.as_bytes()).unwrap().encode()).unwrap();

        assert!(matches!(
            load(&key(), &path),
            Err(CredVaultError::Deserialization(_))
        ));
    }
}
