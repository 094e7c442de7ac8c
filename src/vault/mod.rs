//! Vault module: the encrypted credential container.
//!
//! This module provides:
//! - `SecretRecord` and `Vault` types (`record`)
//! - The sealed vault file format with atomic writes (`codec`)
//! - High-level `VaultStore` for creating, opening, and saving vaults (`store`)

pub mod codec;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use codec::{load, save};
pub use record::{SecretRecord, Vault, VAULT_VERSION};
pub use store::VaultStore;
