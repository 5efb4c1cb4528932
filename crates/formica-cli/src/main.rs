//! Formica CLI - build and inspect ant-colony environments.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "formica")]
#[command(
    author,
    version,
    about = "Formica - environments for stigmergic ant colonies",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default formica.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Build a lattice and report its structure
    Build {
        /// Which kind of lattice to build
        #[arg(value_enum)]
        kind: GridKind,

        /// Override the configured width
        #[arg(short = 'W', long)]
        width: Option<i64>,

        /// Override the configured height
        #[arg(short = 'H', long)]
        height: Option<i64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Trace a deposit decaying tick by tick
    Decay {
        /// Stimulus name
        #[arg(short, long, default_value = "ant:env:stimulus:forage")]
        stimulus: String,

        /// Number of ticks to run
        #[arg(
            short,
            long,
            default_value = "20",
            value_parser = clap::value_parser!(u64).range(0..=commands::decay::MAX_TICKS)
        )]
        ticks: u64,

        /// Amount deposited on the centre cell
        #[arg(short, long, default_value = "1.0")]
        amount: f64,
    },

    /// List registered stimulus types
    Stimuli,
}

/// Lattice variants the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GridKind {
    Nest,
    Pheromone,
    Food,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Build { kind, width, height, json } => {
            let config = Config::load()?;
            commands::build::run(&config, kind, width, height, json)
        }
        Commands::Decay { stimulus, ticks, amount } => {
            let config = Config::load()?;
            commands::decay::run(&config, &stimulus, ticks, amount)
        }
        Commands::Stimuli => {
            let config = Config::load()?;
            commands::stimuli::run(&config)
        }
    }
}
