mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod notify;

use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::{JmaClient, YahooClient};
use error::Result;
use logic::{compose_place_report, ForecastReporter};
use notify::LineClient;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for --dry-run output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    tracing::debug!(?config, "configuration loaded");

    // Missing push credentials fail before any fetch.
    let line = if cli.dry_run {
        None
    } else {
        Some(LineClient::new(config.require_line()?.clone())?)
    };

    let message = match cli.selected_command() {
        Commands::Jma => {
            let reporter = ForecastReporter::new(JmaClient::new()?, config.forecast.clone());
            reporter.report(&Local::now().fixed_offset()).await?
        }
        Commands::Yahoo => {
            let yahoo = config.require_yahoo()?;
            let lines = YahooClient::new(yahoo.clone())?.fetch().await?;
            compose_place_report(&yahoo.place_name, &lines)
        }
    };

    match line {
        Some(client) => {
            client.push(&message).await?;
            println!("OK: pushed.");
        }
        None => println!("{}", message),
    }

    Ok(())
}
