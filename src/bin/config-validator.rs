//! # CaseTrack Configuration Validator
//!
//! Command-line tool for validating CaseTrack configuration files across
//! environments. Helps identify configuration issues before the frontend or
//! a migration run picks them up.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use casetrack_core::config::ConfigManager;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "config-validator")]
#[command(about = "Validate CaseTrack configuration files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Environment to validate (development, test, production)
    #[arg(short, long, default_value = "development")]
    environment: String,

    /// Configuration directory path (default: config)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Print the loaded configuration (password masked) as JSON
    #[arg(long)]
    show: bool,
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    if let Err(error) = run(&cli) {
        error!("configuration invalid: {error:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let manager =
        ConfigManager::load_from_directory_with_env(cli.config_dir.clone(), &cli.environment)
            .with_context(|| format!("loading configuration for '{}'", cli.environment))?;

    info!(
        environment = manager.environment(),
        directory = %manager.config_directory().display(),
        "configuration is valid"
    );

    if cli.show {
        println!("{}", serde_json::to_string_pretty(&manager.debug_config())?);
    }

    Ok(())
}
