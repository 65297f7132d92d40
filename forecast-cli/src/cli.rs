use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, ForecastEntry, ForecastQuery, ForecastService, Units, Update, source_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Multi-day forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and preferred units.
    Configure,

    /// Print the forecast for a location once.
    Show {
        /// City name, e.g. "London".
        location: String,
    },

    /// Prompt for locations repeatedly, replacing the shown forecast each time.
    Watch,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location } => show(&location).await,
            Command::Watch => watch().await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read the API key")?;

    let units = inquire::Select::new(
        "Units:",
        vec![Units::Imperial, Units::Metric, Units::Standard],
    )
    .prompt()
    .context("Failed to read the units choice")?;

    config.set_api_key(api_key);
    config.units = units;
    config.save()?;

    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(location: &str) -> Result<()> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;
    tracing::debug!(location, "fetching forecast");

    let (service, mut updates) = ForecastService::new(Arc::new(source));
    service.submit(ForecastQuery::new(location).with_units(config.units));

    match updates.recv().await {
        Some(Update::Forecast(entries)) => {
            render(&entries, config.units);
            Ok(())
        }
        Some(Update::Notice(notice)) => bail!("{notice}"),
        None => bail!("The fetch worker went away without answering"),
    }
}

async fn watch() -> Result<()> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;
    let units = config.units;

    let (service, mut updates) = ForecastService::new(Arc::new(source));
    let mut shown: Vec<ForecastEntry> = Vec::new();

    println!("Type a location and press enter; press ESC to quit.");

    loop {
        let location = match inquire::Text::new("Location:").prompt() {
            Ok(location) => location,
            Err(inquire::InquireError::OperationCanceled)
            | Err(inquire::InquireError::OperationInterrupted) => break,
            Err(error) => return Err(error).context("Failed to read a location"),
        };

        if !service.submit(ForecastQuery::new(location).with_units(units)) {
            println!("Still fetching the previous forecast");
            continue;
        }

        match updates.recv().await {
            Some(Update::Forecast(entries)) => {
                shown = entries;
                render(&shown, units);
            }
            Some(Update::Notice(notice)) => {
                // Transient message; the previously shown forecast stands.
                println!("! {notice}");
            }
            None => break,
        }
    }

    Ok(())
}

fn render(entries: &[ForecastEntry], units: Units) {
    if entries.is_empty() {
        println!("No forecast days returned.");
        return;
    }

    let suffix = units.temperature_suffix();
    for entry in entries {
        let day = entry
            .date()
            .map(|date| date.format("%a %Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("@{}", entry.timestamp));

        println!(
            "{day}  min {:>6.1}{suffix}  max {:>6.1}{suffix}  humidity {:>3.0}%  {} ({})",
            entry.temp_min, entry.temp_max, entry.humidity, entry.description, entry.icon
        );
    }
}
