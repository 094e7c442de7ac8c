//! `credvault add` — store a new credential.

use crate::cli::output;
use crate::cli::{open_store, read_secret, Cli, SecretSource};
use crate::errors::Result;
use crate::vault::SecretRecord;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    service: &str,
    username: &str,
    notes: Option<&str>,
    source: SecretSource,
) -> Result<()> {
    let (settings, mut store) = open_store(cli)?;

    let secret = read_secret(source, &settings, &format!("Secret for {service}/{username}"))?;
    let record = SecretRecord::new(service, username, secret.as_str(), notes.map(str::to_string))?;

    store.vault_mut().insert(record)?;
    store.save()?;

    tracing::info!(service, username, "credential added");
    output::success(&format!(
        "Added '{service}' / '{username}' ({} total)",
        store.vault().len()
    ));
    if source.generate {
        output::tip(&format!(
            "Generated a {}-character password; show it with `credvault get {service} {username}`.",
            secret.chars().count()
        ));
    }

    Ok(())
}
