#![cfg(feature = "json_schema")]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filterbox::core::FilterCatalog;
use schemars::schema_for;
use std::{fs, path::PathBuf};

/// Generate the JSON Schema for filter catalogs or check a catalog file.
#[derive(Parser, Debug)]
#[command(name = "catalog-schema", about = "Filter catalog schema generator and checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog JSON schema (or write it to a file)
    Schema {
        /// Optional output path for the schema JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load a catalog file and report duplicate or empty identifiers
    Check {
        /// Path to the catalog file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Schema { output } => {
            let schema = schema_for!(FilterCatalog);
            let json = serde_json::to_string_pretty(&schema)?;

            if let Some(path) = output {
                fs::write(&path, json)?;
                eprintln!("Wrote schema to {}", path.display());
            } else {
                println!("{json}");
            }
        }
        Command::Check { file } => {
            let catalog = FilterCatalog::load_from_file(&file)
                .with_context(|| format!("invalid catalog {}", file.display()))?;
            println!("{} is a valid catalog with {} filters", file.display(), catalog.len());
        }
    }

    Ok(())
}
