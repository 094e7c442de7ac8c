use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in credvault.
///
/// Messages never carry key bytes, plaintext secrets or raw ciphertext.
#[derive(Debug, Error)]
pub enum CredVaultError {
    // --- Key errors ---
    #[error("Encryption key must be exactly 32 bytes, got {0}")]
    InvalidKey(usize),

    #[error("Secure random source unavailable: {0}")]
    RandomSource(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: wrong key or tampered data")]
    Authentication,

    #[error("Malformed sealed data: {0}")]
    MalformedInput(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Decrypted vault is not valid: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- Record errors ---
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("No credential for '{service}' / '{username}'")]
    RecordNotFound { service: String, username: String },

    #[error("Credential for '{service}' / '{username}' already exists (use `update` to change it)")]
    RecordAlreadyExists { service: String, username: String },

    // --- Generator errors ---
    #[error("Password length must be between 1 and {max}, got {got}")]
    InvalidPasswordLength { got: usize, max: usize },

    // --- Key file errors ---
    #[error("Key file error: {0}")]
    KeyFile(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for credvault results.
pub type Result<T> = std::result::Result<T, CredVaultError>;
