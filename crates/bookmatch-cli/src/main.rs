//! bookmatch - book recommendations from reading preferences
//!
//! Usage:
//!   bookmatch --catalog books.csv recommend --fiction 8 --age 30
//!   bookmatch --catalog books.csv --links links.json recommend --top 3
//!   bookmatch --catalog books.csv --config config.json recommend --values 8,2,2,2,30,7,2
//!   bookmatch --catalog books.csv evaluate --target title
//!   bookmatch --catalog books.csv catalog --json

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

mod commands;
mod error;
mod output;

use commands::{catalog, evaluate, recommend, Context};

/// bookmatch - Book recommendation tool
///
/// Ranks a CSV catalog against your reading preferences and predicts
/// what kind of reader you are.
#[derive(Parser)]
#[command(name = "bookmatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the catalog CSV
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// JSON object mapping titles to external links
    #[arg(long, global = true, value_name = "FILE")]
    links: Option<PathBuf>,

    /// JSON recommender configuration
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the catalog against your preferences and classify you
    Recommend(recommend::RecommendArgs),

    /// Report held-out accuracy of the decision tree
    Evaluate {
        /// What the tree learns to predict
        #[arg(long, value_enum, default_value = "label")]
        target: evaluate::Target,
    },

    /// List catalog titles and feature vectors
    Catalog,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bookmatch=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    let catalog_path = cli.catalog.ok_or_else(|| {
        error::CliError::InvalidArgument("--catalog <FILE> is required".to_string())
    })?;
    let ctx = Context::load(&catalog_path, cli.links.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Commands::Recommend(args) => recommend::run(&ctx, &args, cli.json),
        Commands::Evaluate { target } => evaluate::run(&ctx, target, cli.json),
        Commands::Catalog => catalog::run(&ctx, cli.json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            e.exit_code()
        }
    }
}
