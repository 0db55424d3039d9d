use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use zonecast::{ForecastOutcome, ForecastPipeline, ZonecastConfig, logging};

/// Look up the weather.gov text forecast for a U.S. location
#[derive(Debug, Parser)]
#[command(name = "zonecast", version, about)]
struct Cli {
    /// Free-text location, e.g. "Kansas City" or "southern Florida"
    location: String,

    /// Path to a TOML config file
    #[arg(long, env = "ZONECAST_CONFIG")]
    config: Option<PathBuf>,

    /// Log prompts and raw model output
    #[arg(short, long)]
    verbose: bool,

    /// Print the raw tool result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ZonecastConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    let pipeline = ForecastPipeline::from_config(&config)?;

    let outcome = match pipeline.get_forecast(&cli.location).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Forecast lookup failed: {}", e);
            anyhow::bail!(e.user_message());
        }
    };

    if cli.json {
        let rendered =
            serde_json::to_string_pretty(&outcome).context("Failed to render outcome")?;
        println!("{rendered}");
        return Ok(());
    }

    match outcome {
        ForecastOutcome::Message(message) => println!("{message}"),
        ForecastOutcome::Forecast(forecast) => print!("{forecast}"),
    }

    Ok(())
}
