//! Routesim CLI — router network simulator.
//!
//! Subcommands: shell, show, query, generate.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Routesim — link-state router network simulator.
#[derive(Parser, Debug)]
#[command(name = "routesim", version, about, long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive topology shell.
    Shell(commands::shell::ShellArgs),
    /// Print a topology file, optionally with every routing table.
    Show(commands::show::ShowArgs),
    /// Query cost and path between two routers of a topology file.
    Query(commands::query::QueryArgs),
    /// Generate a random topology file.
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    match &cli.command {
        Commands::Shell(args) => commands::shell::run(args),
        Commands::Show(args) => commands::show::run(args),
        Commands::Query(args) => commands::query::run(args),
        Commands::Generate(args) => commands::generate::run(args),
    }
}
