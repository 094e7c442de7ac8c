//! `credvault generate` — print a random password.

use crate::cli::settings;
use crate::crypto;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => settings()?.password_length,
    };

    let password = zeroize::Zeroizing::new(crypto::generate_password(length)?);
    println!("{}", password.as_str());

    Ok(())
}
