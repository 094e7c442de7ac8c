//! `credvault update` — replace a credential's secret and notes.

use crate::cli::output;
use crate::cli::{open_store, read_secret, Cli, SecretSource};
use crate::errors::{CredVaultError, Result};

/// Execute the `update` command.
///
/// This is a full-field update: omitting `--notes` clears them.
pub fn execute(
    cli: &Cli,
    service: &str,
    username: &str,
    notes: Option<&str>,
    source: SecretSource,
) -> Result<()> {
    let (settings, mut store) = open_store(cli)?;

    // Check existence before prompting for a value we would discard.
    if store.vault().get(service, username).is_none() {
        return Err(CredVaultError::RecordNotFound {
            service: service.to_string(),
            username: username.to_string(),
        });
    }

    let secret = read_secret(
        source,
        &settings,
        &format!("New secret for {service}/{username}"),
    )?;
    store
        .vault_mut()
        .update(service, username, secret.as_str(), notes.map(str::to_string))?;
    store.save()?;

    tracing::info!(service, username, "credential updated");
    output::success(&format!("Updated '{service}' / '{username}'"));

    Ok(())
}
