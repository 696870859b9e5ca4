mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mgc", about = "Multiscale gradient correction for astro images")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove the large-scale gradient of a target using a wide-field reference
    Correct(commands::correct::CorrectArgs),
    /// Write the large-scale (low-pass) structure of an image
    Decompose(commands::decompose::DecomposeArgs),
    /// Print or save a default config file
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Correct(args) => commands::correct::run(args),
        Commands::Decompose(args) => commands::decompose::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
