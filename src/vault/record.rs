//! `SecretRecord` and the in-memory `Vault` collection.
//!
//! A vault is an ordered list of records.  Records are identified by
//! their `(service, username)` pair, which must be unique.  Insertion
//! order is preserved so save/load round-trips are deterministic.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{CredVaultError, Result};

/// Current version of the serialized vault payload.
pub const VAULT_VERSION: u32 = 1;

/// A single credential.
///
/// `secret` is held in plaintext only while the record is in memory;
/// every field except the timestamp is wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SecretRecord {
    service: String,
    username: String,
    secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[zeroize(skip)]
    created_at: DateTime<Utc>,
}

impl SecretRecord {
    /// Create a record stamped with the current time.
    ///
    /// `service` must contain at least one non-whitespace character.
    pub fn new(
        service: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
        notes: Option<String>,
    ) -> Result<Self> {
        let service = service.into();
        validate_service(&service)?;
        Ok(Self {
            service,
            username: username.into(),
            secret: secret.into(),
            notes,
            created_at: Utc::now(),
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The plaintext secret.  Never log this.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn matches(&self, service: &str, username: &str) -> bool {
        self.service == service && self.username == username
    }
}

impl fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRecord")
            .field("service", &self.service)
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .finish()
    }
}

fn validate_service(service: &str) -> Result<()> {
    if service.trim().is_empty() {
        return Err(CredVaultError::InvalidRecord(
            "service name cannot be empty".into(),
        ));
    }
    Ok(())
}

/// Ordered collection of records, the unit persisted by the vault codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    version: u32,
    entries: Vec<SecretRecord>,
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

impl Vault {
    pub fn new() -> Self {
        Self {
            version: VAULT_VERSION,
            entries: Vec::new(),
        }
    }

    /// Payload version read from (or to be written to) disk.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[SecretRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a record by its `(service, username)` pair.
    pub fn get(&self, service: &str, username: &str) -> Option<&SecretRecord> {
        self.entries.iter().find(|r| r.matches(service, username))
    }

    /// Append a new record.
    pub fn insert(&mut self, record: SecretRecord) -> Result<()> {
        if self.get(&record.service, &record.username).is_some() {
            return Err(CredVaultError::RecordAlreadyExists {
                service: record.service.clone(),
                username: record.username.clone(),
            });
        }
        self.entries.push(record);
        Ok(())
    }

    /// Replace the secret and notes of an existing record.
    ///
    /// This is a full-field update: `notes: None` clears any existing
    /// notes.  The record keeps its position and its `created_at`.
    pub fn update(
        &mut self,
        service: &str,
        username: &str,
        secret: impl Into<String>,
        notes: Option<String>,
    ) -> Result<&SecretRecord> {
        let record = self
            .entries
            .iter_mut()
            .find(|r| r.matches(service, username))
            .ok_or_else(|| not_found(service, username))?;

        record.secret.zeroize();
        record.secret = secret.into();
        record.notes = notes;
        Ok(&*record)
    }

    /// Remove and return a record.
    pub fn remove(&mut self, service: &str, username: &str) -> Result<SecretRecord> {
        let index = self
            .entries
            .iter()
            .position(|r| r.matches(service, username))
            .ok_or_else(|| not_found(service, username))?;
        Ok(self.entries.remove(index))
    }

    /// Check invariants that deserialization alone does not enforce:
    /// every service is non-blank and every `(service, username)` pair
    /// appears once.
    pub fn validate(&self) -> Result<()> {
        for (i, record) in self.entries.iter().enumerate() {
            validate_service(&record.service)?;
            if self.entries[..i]
                .iter()
                .any(|r| r.matches(&record.service, &record.username))
            {
                return Err(CredVaultError::InvalidRecord(format!(
                    "duplicate credential for '{}' / '{}'",
                    record.service, record.username
                )));
            }
        }
        Ok(())
    }
}

fn not_found(service: &str, username: &str) -> CredVaultError {
    CredVaultError::RecordNotFound {
        service: service.to_string(),
        username: username.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(service: &str, username: &str, secret: &str) -> SecretRecord {
        SecretRecord::new(service, username, secret, None).unwrap()
    }

    #[test]
    fn new_rejects_blank_service() {
        assert!(matches!(
            SecretRecord::new("", "alice", "pw", None),
            Err(CredVaultError::InvalidRecord(_))
        ));
        assert!(SecretRecord::new("   ", "alice", "pw", None).is_err());
    }

    #[test]
    fn empty_username_is_allowed() {
        let r = record("github", "", "pw");
        assert_eq!(r.username(), "");
    }

    #[test]
    fn insert_preserves_order_and_rejects_duplicates() {
        let mut vault = Vault::new();
        vault.insert(record("github", "alice", "a")).unwrap();
        vault.insert(record("aws", "root", "b")).unwrap();
        vault.insert(record("github", "bob", "c")).unwrap();

        let services: Vec<_> = vault.records().iter().map(|r| r.service()).collect();
        assert_eq!(services, ["github", "aws", "github"]);

        let err = vault.insert(record("github", "alice", "d")).unwrap_err();
        assert!(matches!(err, CredVaultError::RecordAlreadyExists { .. }));
        assert_eq!(vault.len(), 3);
    }

    #[test]
    fn update_replaces_fields_and_keeps_created_at() {
        let mut vault = Vault::new();
        vault
            .insert(SecretRecord::new("github", "alice", "old", Some("2fa on".into())).unwrap())
            .unwrap();
        let created = vault.get("github", "alice").unwrap().created_at();

        let updated = vault.update("github", "alice", "new", None).unwrap();
        assert_eq!(updated.secret(), "new");
        assert_eq!(updated.notes(), None);
        assert_eq!(updated.created_at(), created);
    }

    #[test]
    fn update_missing_record_fails() {
        let mut vault = Vault::new();
        assert!(matches!(
            vault.update("nope", "x", "pw", None),
            Err(CredVaultError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn remove_returns_record() {
        let mut vault = Vault::new();
        vault.insert(record("github", "alice", "a")).unwrap();
        vault.insert(record("aws", "root", "b")).unwrap();

        let removed = vault.remove("github", "alice").unwrap();
        assert_eq!(removed.secret(), "a");
        assert_eq!(vault.len(), 1);
        assert!(vault.get("github", "alice").is_none());
        assert!(vault.remove("github", "alice").is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let shown = format!("{:?}", record("github", "alice", "hunter2"));
        assert!(shown.contains("github"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn notes_are_omitted_from_json_when_absent() {
        let json = serde_json::to_string(&record("svc", "u", "p")).unwrap();
        assert!(!json.contains("notes"));
    }
}
