//! ormeta Command-Line Inspector
//!
//! Loads a JSON schema manifest, correlates it and prints the resulting
//! entity metadata.

mod commands;
mod formatter;

use clap::{Parser, Subcommand};
use formatter::OutputFormat;
use std::path::PathBuf;

/// ormeta Command-Line Inspector
#[derive(Parser, Debug)]
#[command(name = "ormeta")]
#[command(version, about = "Inspect correlated entity metadata")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(long, default_value = "table", value_enum, global = true)]
    pub format: OutputFormat,

    /// Reject entities registered twice for the same type
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show entities with their columns, indices and uniques
    Show {
        /// Path to the manifest
        manifest: PathBuf,
        /// Only show the entity with this type name
        #[arg(short, long)]
        entity: Option<String>,
    },
    /// Print the ancestor chain of a type
    Chain {
        /// Path to the manifest
        manifest: PathBuf,
        /// Type name
        type_name: String,
    },
    /// Validate the correlated metadata
    Check {
        /// Path to the manifest
        manifest: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ormeta_cli=info".parse().unwrap())
                .add_directive("ormeta_core=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(output) => {
            println!("{}", output.text);
            if !output.success {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<commands::CommandOutput, Box<dyn std::error::Error>> {
    let formatter = formatter::create_formatter(args.format);

    let output = match &args.command {
        Command::Show { manifest, entity } => {
            let loaded = commands::load(manifest, args.strict)?;
            commands::show(&loaded, entity.as_deref(), formatter.as_ref())?
        }
        Command::Chain {
            manifest,
            type_name,
        } => {
            let loaded = commands::load(manifest, args.strict)?;
            commands::chain(&loaded, type_name, formatter.as_ref())?
        }
        Command::Check { manifest } => {
            let loaded = commands::load(manifest, args.strict)?;
            commands::check(&loaded, formatter.as_ref())
        }
    };

    Ok(output)
}
