//! CLI command implementations

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::http::{AppState, HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::schema::load_schema;
use crate::store::{InMemoryStore, JsonlStore, SubmissionStore};
use crate::validate::compile;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Dispatches the parsed command.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Serve {
            schema,
            host,
            port,
            data_dir,
        } => serve(&schema, host, port, data_dir.as_deref()),
        Command::Check { schema } => check(&schema),
        Command::Validate { schema, input } => validate(&schema, &input),
    }
}

/// Loads the schema, compiles it once, and serves until shutdown.
fn serve(schema_path: &Path, host: String, port: u16, data_dir: Option<&Path>) -> CliResult<()> {
    let schema = load_schema(schema_path)?;
    let form = compile(&schema)?;

    Logger::info(
        "schema.loaded",
        &[
            ("path", &schema_path.display().to_string()),
            ("title", &schema.title),
            ("fields", &form.len().to_string()),
        ],
    );

    let store: Arc<dyn SubmissionStore> = match data_dir {
        Some(dir) => {
            let store = JsonlStore::open(dir)?;
            Logger::info(
                "store.opened",
                &[
                    ("kind", "jsonl"),
                    ("path", &store.path().display().to_string()),
                    ("replayed", &store.count()?.to_string()),
                ],
            );
            Arc::new(store)
        }
        None => {
            Logger::info("store.opened", &[("kind", "memory")]);
            Arc::new(InMemoryStore::new())
        }
    };

    let config = HttpServerConfig {
        host,
        port,
        ..Default::default()
    };
    let state = Arc::new(AppState::new(schema, form, store));
    let server = HttpServer::new(config, state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;

    Ok(())
}

/// Loads and compiles a schema, printing one line per field.
fn check(schema_path: &Path) -> CliResult<()> {
    let schema = load_schema(schema_path)?;
    let form = compile(&schema)?;

    println!("{} ({} fields)", schema.title, form.len());
    for field in &schema.fields {
        let required = if field.required { "required" } else { "optional" };
        println!(
            "  {:<20} {:<12} {}",
            field.name,
            field.field_type.type_name(),
            required
        );
    }

    Ok(())
}

/// One-shot validation of a payload file; prints the normalized payload or
/// the error map as JSON.
fn validate(schema_path: &Path, input: &Path) -> CliResult<()> {
    let schema = load_schema(schema_path)?;
    let form = compile(&schema)?;

    let content = fs::read_to_string(input)?;
    let payload: Value =
        serde_json::from_str(&content).map_err(|e| CliError::InvalidPayload {
            path: input.display().to_string(),
            reason: e.to_string(),
        })?;

    match form.validate(&payload) {
        Ok(normalized) => {
            println!("{}", serde_json::to_string_pretty(&normalized)?);
            Ok(())
        }
        Err(errors) => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
            Err(CliError::ValidationFailed)
        }
    }
}
