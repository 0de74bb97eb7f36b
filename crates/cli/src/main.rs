mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::{read_config, ClearanceConfig};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Clearance decision derivation.
#[derive(Parser)]
#[command(
    name = "clearance",
    version,
    about = "Derive clearance decisions for customs declarations"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a decision for every declaration in a context file
    Derive {
        /// Path to the declaration context JSON file
        context: PathBuf,
    },

    /// Match declared documents against notifications
    Match {
        /// Path to the declaration context JSON file
        context: PathBuf,
    },

    /// Compare two decision JSON files
    Compare {
        /// First decision JSON file
        a: PathBuf,
        /// Second decision JSON file
        b: PathBuf,
    },

    /// Derive and persist one declaration's decision against a store file
    Sync {
        /// Path to the store JSON file (a declaration context)
        store: PathBuf,
        /// Movement reference number of the declaration
        mrn: String,
        /// Save the store back to the file after a write
        #[arg(long)]
        write: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => match read_config(path) {
            Ok(config) => config,
            Err(e) => {
                report_error(&format!("error: {}", e), cli.output, cli.quiet);
                process::exit(1);
            }
        },
        None => ClearanceConfig::default(),
    };
    init_logging(&config.logging.level);

    match cli.command {
        Commands::Derive { context } => {
            commands::derive::cmd_derive(&context, &config, cli.output, cli.quiet);
        }
        Commands::Match { context } => {
            commands::matching::cmd_match(&context, cli.output, cli.quiet);
        }
        Commands::Compare { a, b } => {
            commands::compare::cmd_compare(&a, &b, cli.output, cli.quiet);
        }
        Commands::Sync { store, mrn, write } => {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    let msg = format!("error: failed to create tokio runtime: {}", e);
                    report_error(&msg, cli.output, cli.quiet);
                    process::exit(1);
                }
            };
            rt.block_on(commands::sync::cmd_sync(
                &store, &mrn, write, &config, cli.output, cli.quiet,
            ));
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `level`; logs go to
/// stderr so JSON on stdout stays parseable.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
