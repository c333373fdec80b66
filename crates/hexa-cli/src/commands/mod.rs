//! One module per subcommand.  Each exposes an `execute` function that
//! translates arguments into core calls and renders the result.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;
pub mod new;
