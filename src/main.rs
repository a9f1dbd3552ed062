mod cli;
mod codegen;
mod error;
mod introspect;
mod metadata;
mod naming;
mod response;
mod schema;
#[cfg(test)]
mod testutil;
mod typemap;

use std::fs;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, GeneratorKind};
use crate::codegen::procedures::ProcedureGenerator;
use crate::codegen::views::ViewGenerator;
use crate::codegen::Generator;
use crate::error::SqlGenError;
use crate::response::GenerationResponse;
use crate::schema::DEFAULT_SCHEMA;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = if cli.json {
        let kind = cli.generator_kind().ok();
        json_output(GenerationResponse::from_result(kind, generate(&cli).await))?
    } else {
        generate(&cli).await?
    };
    write_output(cli.outfile.as_deref(), &output)?;

    Ok(())
}

/// The envelope as one line of JSON. Failures are reported inside it, so
/// only serialisation can fail here.
fn json_output(response: GenerationResponse) -> Result<String, SqlGenError> {
    let mut output = response.to_json()?;
    output.push('\n');
    Ok(output)
}

fn write_output(outfile: Option<&str>, output: &str) -> Result<(), SqlGenError> {
    match outfile {
        Some(path) => {
            fs::write(path, output)?;
            tracing::info!("Output written to {path}");
        }
        None => {
            print!("{output}");
        }
    }
    Ok(())
}

/// Validate the arguments, load the catalog over one session, and run the
/// selected generator against it.
async fn generate(cli: &Cli) -> Result<String, SqlGenError> {
    let kind = cli.generator_kind()?;
    let config = cli.parse_connection()?.to_tiberius()?;
    let schemas = cli.schema_list_or(DEFAULT_SCHEMA);
    let table_filter = cli.table_list();

    tracing::debug!("Connecting to database...");
    let catalog = introspect::mssql::load_catalog(config, &schemas, &table_filter).await?;
    tracing::debug!(
        "Found {} tables and {} foreign key columns",
        catalog.tables.len(),
        catalog.foreign_keys.len()
    );

    match kind {
        GeneratorKind::Procedures => ProcedureGenerator.generate_all(&catalog),
        GeneratorKind::Views => ViewGenerator.generate_all(&catalog),
    }
}
