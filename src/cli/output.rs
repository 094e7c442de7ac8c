//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::SecretRecord;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print credentials as a table (Service, Username, Notes, Created).
///
/// The secret column is deliberately absent.
pub fn print_records_table(records: &[SecretRecord]) {
    if records.is_empty() {
        info("No credentials in this vault yet.");
        tip("Run `credvault add <SERVICE> <USERNAME>` to add your first one.");
        return;
    }

    println!("{}", records_table(records));
}

fn records_table(records: &[SecretRecord]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Service", "Username", "Notes", "Created"]);

    for r in records {
        table.add_row(vec![
            r.service().to_string(),
            r.username().to_string(),
            r.notes().unwrap_or("").to_string(),
            r.created_at().format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    table
}
