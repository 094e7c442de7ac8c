//! `credvault seal-field` / `open-field` — single-field sealing for
//! external stores that keep one `<ciphertext>|<nonce>` string per row.

use crate::cli::{load_key, read_stdin_value, settings, Cli};
use crate::crypto::AuthenticatedCipher;
use crate::errors::{CredVaultError, Result};

/// Execute the `seal-field` command: stdin plaintext -> sealed string.
pub fn execute_seal(cli: &Cli) -> Result<()> {
    let key = load_key(cli, &settings()?)?;
    let cipher = AuthenticatedCipher::new(&key);

    let plaintext = read_stdin_value()?;
    if plaintext.is_empty() {
        return Err(CredVaultError::CommandFailed(
            "nothing to seal: pipe the value on stdin".into(),
        ));
    }
    println!("{}", cipher.seal_field(&plaintext)?);

    Ok(())
}

/// Execute the `open-field` command: sealed string -> plaintext.
pub fn execute_open(cli: &Cli, sealed: &str) -> Result<()> {
    let key = load_key(cli, &settings()?)?;
    let cipher = AuthenticatedCipher::new(&key);

    let plaintext = zeroize::Zeroizing::new(cipher.open_field(sealed.trim())?);
    println!("{}", plaintext.as_str());

    Ok(())
}
