use clap::{Parser, Subcommand};
use colored::Colorize;
use seeds_core::SeedsClient;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use seeds_cli::commands::seed_cmd::{self, RunArgs, SeedArgs, SeedReport};
use seeds_cli::commands::{check_cmd, init_cmd};
use seeds_cli::config::resolve_endpoint_config;
use seeds_cli::errors::Error;
use seeds_cli::seed_file::load_seed_file;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Seeds CLI: create and remove test fixtures through a seeds API
#[derive(Parser, Debug)]
#[command(name = "seeds")]
#[command(about = "Create and remove test fixtures through a seeds API", long_about = None)]
struct Cli {
    /// Path to the configuration file (default: ./seeds.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Base URL of the seeds API, overriding the configuration file
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a starter configuration file
    Init,

    /// Check connectivity with the seeds API
    Check,

    /// Create every seed of a seed file
    Create(SeedArgs),

    /// Create every seed of a seed file, then remove them again
    Run(RunArgs),

    /// Show the CLI version
    Version,
}

async fn connect(cli: &Cli) -> Result<SeedsClient, Error> {
    let config = resolve_endpoint_config(cli.config.as_deref(), cli.base_url.as_deref())?;
    Ok(SeedsClient::connect(&config).await?)
}

fn print_report(report: &SeedReport) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

async fn execute(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Commands::Init => {
            let path = init_cmd::init_config(cli.config.as_deref(), cli.base_url.as_deref())?;
            println!("{} Configuration initialized at {:?}", "✓".green(), path);
        }
        Commands::Check => {
            let config = resolve_endpoint_config(cli.config.as_deref(), cli.base_url.as_deref())?;
            let base_url = check_cmd::check_connectivity(&config).await?;
            println!("{} Seeds API reachable at {}", "✓".green(), base_url);
        }
        Commands::Create(args) => {
            let definitions = load_seed_file(&args.file)?;
            let client = connect(cli).await?;
            let report = seed_cmd::create_seeds(&client, definitions, args.name.as_deref()).await?;
            print_report(&report)?;
        }
        Commands::Run(args) => {
            let definitions = load_seed_file(&args.seeds.file)?;
            let client = connect(cli).await?;
            let report = seed_cmd::run_seeds(
                &client,
                definitions,
                args.seeds.name.as_deref(),
                args.keep,
            )
            .await?;
            print_report(&report)?;
        }
        Commands::Version => {
            println!(
                "seeds version {}",
                option_env!("SEEDS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("SEEDS_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = execute(&cli).await {
        error!("Error: {e}");
        eprintln!("{} {e}", "✗".red());
        std::process::exit(1);
    }
}
