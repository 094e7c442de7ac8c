//! `credvault init` — create a new empty vault.

use crate::cli::output;
use crate::cli::{load_key, settings, vault_path, Cli};
use crate::errors::Result;
use crate::vault::VaultStore;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = settings()?;
    let path = vault_path(cli, &settings)?;

    // Fail on a missing key before touching the filesystem.
    let key = load_key(cli, &settings)?;

    VaultStore::create(&path, &key)?;

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `credvault add <SERVICE> <USERNAME>` to store a credential.");
    output::tip("Run `credvault list` to see stored credentials.");

    Ok(())
}
