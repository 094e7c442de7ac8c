//! High-level vault handle used by CLI commands.
//!
//! `VaultStore` ties together the vault file path, a cipher built from
//! the key, and the records loaded from disk, so commands can write
//! `store.vault_mut().insert(record)?; store.save()?;`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::crypto::{AuthenticatedCipher, EncryptionKey};
use crate::errors::{CredVaultError, Result};

use super::codec;
use super::record::Vault;

/// The main vault handle.  Create one with `VaultStore::create` or
/// `VaultStore::open`, then use `vault`/`vault_mut` and `save`.
#[derive(Debug)]
pub struct VaultStore {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Cipher for the vault key; the key itself is not retained.
    cipher: AuthenticatedCipher,

    /// In-memory records, between a load and the next save.
    vault: Vault,
}

impl VaultStore {
    /// Create a brand-new, empty vault file at `path`.
    ///
    /// Parent directories are created as needed.
    pub fn create(path: &Path, key: &EncryptionKey) -> Result<Self> {
        if path.exists() {
            return Err(CredVaultError::VaultAlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self {
            path: path.to_path_buf(),
            cipher: AuthenticatedCipher::new(key),
            vault: Vault::new(),
        };
        store.save()?;

        tracing::info!(path = %path.display(), "vault created");
        Ok(store)
    }

    /// Open an existing vault file.
    pub fn open(path: &Path, key: &EncryptionKey) -> Result<Self> {
        let cipher = AuthenticatedCipher::new(key);
        let vault = codec::load_with(&cipher, path)?;
        Ok(Self {
            path: path.to_path_buf(),
            cipher,
            vault,
        })
    }

    /// Open the vault at `path`, creating an empty one if it is missing.
    pub fn open_or_create(path: &Path, key: &EncryptionKey) -> Result<Self> {
        match Self::open(path, key) {
            Err(CredVaultError::VaultNotFound(_)) => Self::create(path, key),
            other => other,
        }
    }

    /// Seal the current records and write them to disk atomically.
    pub fn save(&self) -> Result<()> {
        codec::save_with(&self.vault, &self.cipher, &self.path)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cipher bound to this vault's key, for sealing single fields.
    pub fn cipher(&self) -> &AuthenticatedCipher {
        &self.cipher
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Mutable access to the records.  Changes are in memory until
    /// `save` is called.
    pub fn vault_mut(&mut self) -> &mut Vault {
        &mut self.vault
    }
}
