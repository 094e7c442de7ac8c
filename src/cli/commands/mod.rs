//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod completions;
pub mod delete;
pub mod field;
pub mod generate;
pub mod get;
pub mod init;
pub mod keygen;
pub mod list;
pub mod update;
