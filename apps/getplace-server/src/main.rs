mod config;
mod demo;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// GetPlace Server - places, layouts and bookings
#[derive(Parser)]
#[command(name = "getplace-server")]
#[command(about = "GetPlace Server - places, layouts and bookings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration and exit
    Check,
    /// Run a scripted scenario against in-memory stores and print the resulting place
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config: defaults -> YAML (if provided) -> env (GETPLACE__*) -> CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_verbosity(cli.verbose);

    logging::init_logging(&config.logging)?;
    tracing::info!("GetPlace Server starting");

    if cli.print_config {
        println!("{}", config.to_pretty_string()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => check_config(&config),
        Commands::Demo => {
            let report = demo::run_demo(config.places).await?;
            let rendered =
                serde_json::to_string_pretty(&report).context("failed to render demo report")?;
            println!("{rendered}");
            Ok(())
        }
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_pretty_string()?);
    Ok(())
}
