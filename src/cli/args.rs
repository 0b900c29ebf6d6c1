//! CLI argument definitions using clap
//!
//! Commands:
//! - dynaform serve --schema <path> [--host <host>] [--port <port>] [--data-dir <dir>]
//! - dynaform check --schema <path>
//! - dynaform validate --schema <path> --input <payload.json>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dynaform - a schema-driven dynamic form service
#[derive(Parser, Debug)]
#[command(name = "dynaform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to the form schema document
        #[arg(long, default_value = "./form_schema.json")]
        schema: PathBuf,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 3000)]
        port: u16,

        /// Directory for persistent submission storage; omit for in-memory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Load and compile a schema, then print a field summary
    Check {
        /// Path to the form schema document
        #[arg(long, default_value = "./form_schema.json")]
        schema: PathBuf,
    },

    /// Validate one payload file against a schema and exit
    Validate {
        /// Path to the form schema document
        #[arg(long, default_value = "./form_schema.json")]
        schema: PathBuf,

        /// Path to a JSON payload file
        #[arg(long)]
        input: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
