//! `credvault keygen` — create a new random key file.

use std::path::Path;

use crate::cli::output;
use crate::cli::{key_path, settings, Cli};
use crate::crypto;
use crate::errors::Result;

/// Execute the `keygen` command.
pub fn execute(cli: &Cli, output_path: Option<&str>, force: bool) -> Result<()> {
    let path = match output_path {
        Some(p) => std::env::current_dir()?.join(Path::new(p)),
        None => key_path(cli, &settings()?)?,
    };

    if force && path.exists() {
        output::warning("Overwriting existing key file; vaults sealed with the old key become unreadable.");
    }

    crypto::generate_keyfile(&path, force)?;

    output::success(&format!("Key file written to {}", path.display()));
    output::tip("Keep this file secret and backed up: without it the vault cannot be opened.");

    Ok(())
}
