use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CredVaultError, Result};

/// Project-level configuration, loaded from `.credvault.toml`.
///
/// Every field has a sensible default so credvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file location, relative to the project directory.
    #[serde(default = "default_vault_path")]
    pub vault_path: String,

    /// Base64 key file location, relative to the project directory.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Length used by `generate` and `--generate` when none is given.
    #[serde(default = "default_password_length")]
    pub password_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_path() -> String {
    "credvault.vault".to_string()
}

fn default_key_file() -> String {
    "encryption.key".to_string()
}

fn default_password_length() -> usize {
    20
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: default_vault_path(),
            key_file: default_key_file(),
            password_length: default_password_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".credvault.toml";

    /// Load settings from `<project_dir>/.credvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CredVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "settings loaded");
        Ok(settings)
    }

    /// Full path to the vault file.
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_path)
    }

    /// Full path to the key file.
    pub fn key_file(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.key_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_path, "credvault.vault");
        assert_eq!(s.key_file, "encryption.key");
        assert_eq!(s.password_length, 20);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_path, "credvault.vault");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_path = "secrets/team.vault"
key_file = "/run/secrets/credvault.key"
password_length = 32
"#;
        fs::write(tmp.path().join(".credvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_path, "secrets/team.vault");
        assert_eq!(settings.key_file, "/run/secrets/credvault.key");
        assert_eq!(settings.password_length, 32);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".credvault.toml"), "password_length = 40\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.password_length, 40);
        assert_eq!(settings.key_file, "encryption.key");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".credvault.toml"), "not valid {{toml").unwrap();

        assert!(matches!(
            Settings::load(tmp.path()),
            Err(CredVaultError::Config(_))
        ));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let s = Settings {
            key_file: "/run/secrets/k".to_string(),
            ..Settings::default()
        };
        let project = Path::new("/home/user/project");
        assert_eq!(s.key_file(project), PathBuf::from("/run/secrets/k"));
        assert_eq!(
            s.vault_path(project),
            PathBuf::from("/home/user/project/credvault.vault")
        );
    }
}
