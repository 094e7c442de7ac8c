//! `credvault delete` — remove a credential from the vault.

use std::io::{self, IsTerminal};

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, service: &str, username: &str, force: bool) -> Result<()> {
    let (_, mut store) = open_store(cli)?;

    if store.vault().get(service, username).is_none() {
        return Err(CredVaultError::RecordNotFound {
            service: service.to_string(),
            username: username.to_string(),
        });
    }

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        if !io::stdin().is_terminal() {
            return Err(CredVaultError::CommandFailed(
                "refusing to delete without confirmation; pass --force".into(),
            ));
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{service}' / '{username}'?"))
            .default(false)
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.vault_mut().remove(service, username)?;
    store.save()?;

    tracing::info!(service, username, "credential deleted");
    output::success(&format!("Deleted '{service}' / '{username}'"));

    Ok(())
}
