//! CLI module
//!
//! Provides the command-line interface:
//! - serve: load the schema, compile it, start the HTTP server
//! - check: load + compile a schema and print a field summary
//! - validate: one-shot payload validation

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run_command;
pub use errors::{CliError, CliResult};

/// Parses arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}
