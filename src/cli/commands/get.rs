//! `credvault get` — print a single credential's secret.

use crate::cli::{open_store, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, service: &str, username: &str) -> Result<()> {
    let (_, store) = open_store(cli)?;

    let record = store
        .vault()
        .get(service, username)
        .ok_or_else(|| CredVaultError::RecordNotFound {
            service: service.to_string(),
            username: username.to_string(),
        })?;

    // Print the plaintext secret to stdout.
    println!("{}", record.secret());

    Ok(())
}
