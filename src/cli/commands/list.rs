//! `credvault list` — display stored credentials in a table.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (_, store) = open_store(cli)?;
    let records = store.vault().records();

    output::info(&format!(
        "{}: {} credential(s)",
        store.path().display(),
        records.len()
    ));
    output::print_records_table(records);

    Ok(())
}
