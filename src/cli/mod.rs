//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::{self, EncryptionKey};
use crate::errors::{CredVaultError, Result};
use crate::vault::VaultStore;

/// credvault CLI: encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Encrypted credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: from .credvault.toml, else credvault.vault)
    #[arg(long, global = true)]
    pub vault: Option<String>,

    /// Base64 key file (default: from .credvault.toml, else encryption.key)
    #[arg(long, env = "CREDVAULT_KEY_FILE", global = true)]
    pub key_file: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a new random 256-bit key file
    Keygen {
        /// Where to write the key (default: the configured key file)
        #[arg(short, long)]
        output: Option<String>,
        /// Overwrite an existing key file
        #[arg(long)]
        force: bool,
    },

    /// Print a random password
    Generate {
        /// Number of characters (default: from .credvault.toml, else 20)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Create a new empty vault
    Init,

    /// Add a credential
    Add {
        /// Service name (e.g. github.com)
        service: String,
        /// Account username
        username: String,
        /// Free-form notes stored alongside the secret
        #[arg(long)]
        notes: Option<String>,
        #[command(flatten)]
        source: SecretSource,
    },

    /// Print a credential's secret
    Get {
        service: String,
        username: String,
    },

    /// List stored credentials (secrets are never shown)
    List,

    /// Replace a credential's secret and notes
    Update {
        service: String,
        username: String,
        /// New notes (omit to clear)
        #[arg(long)]
        notes: Option<String>,
        #[command(flatten)]
        source: SecretSource,
    },

    /// Delete a credential
    Delete {
        service: String,
        username: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Seal a value read from stdin into a `<ciphertext>|<nonce>` field
    SealField,

    /// Open a sealed `<ciphertext>|<nonce>` field and print the plaintext
    OpenField {
        /// The sealed field
        sealed: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Where a new secret value comes from.
///
/// Secrets are never accepted as plain arguments so they stay out of
/// shell history.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct SecretSource {
    /// Generate a random password instead of prompting
    #[arg(short, long)]
    pub generate: bool,

    /// Length of the generated password
    #[arg(short, long, requires = "generate")]
    pub length: Option<usize>,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.credvault.toml` from the current directory.
pub fn settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the vault file path: `--vault` wins over the config file.
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.vault {
        Some(path) => cwd.join(path),
        None => settings.vault_path(&cwd),
    })
}

/// Resolve the key file path: `--key-file` wins over the config file.
pub fn key_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.key_file {
        Some(path) => cwd.join(path),
        None => settings.key_file(&cwd),
    })
}

/// Load the vault key from `CREDVAULT_KEY` or the key file.
pub fn load_key(cli: &Cli, settings: &Settings) -> Result<EncryptionKey> {
    crypto::resolve_key(&key_path(cli, settings)?)
}

/// Load settings and key, then open the configured vault.
pub fn open_store(cli: &Cli) -> Result<(Settings, VaultStore)> {
    let settings = settings()?;
    let key = load_key(cli, &settings)?;
    let store = VaultStore::open(&vault_path(cli, &settings)?, &key)?;
    Ok((settings, store))
}

/// Obtain a new secret value, trying in order:
/// 1. `--generate` (random password)
/// 2. Piped stdin (trailing newline stripped)
/// 3. Interactive hidden prompt with confirmation
///
/// Returns `Zeroizing<String>` so the value is wiped from memory on drop.
pub fn read_secret(
    source: SecretSource,
    settings: &Settings,
    prompt: &str,
) -> Result<Zeroizing<String>> {
    if source.generate {
        let length = source.length.unwrap_or(settings.password_length);
        return Ok(Zeroizing::new(crypto::generate_password(length)?));
    }

    let value = if io::stdin().is_terminal() {
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(prompt)
                .with_confirmation("Confirm secret", "Values do not match, try again")
                .interact()
                .map_err(|e| CredVaultError::CommandFailed(format!("secret prompt: {e}")))?,
        )
    } else {
        read_stdin_value()?
    };

    if value.is_empty() {
        return Err(CredVaultError::CommandFailed(
            "secret value cannot be empty".into(),
        ));
    }
    Ok(value)
}

/// Read all of stdin, dropping trailing line endings.
pub fn read_stdin_value() -> Result<Zeroizing<String>> {
    let mut buf = Zeroizing::new(String::new());
    io::stdin().read_to_string(&mut buf)?;
    let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
    buf.truncate(trimmed_len);
    Ok(buf)
}
