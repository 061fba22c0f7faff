use std::net::SocketAddr;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_lookup::{Config, WeatherLookup, WeatherQuery, WeatherReport};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather lookup via WeatherAPI.com")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key and endpoint.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; defaults to London.
        city: Option<String>,
    },

    /// Serve the weather page at /weather/{city}.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(WeatherQuery::or_default(city)).await,
            Command::Serve { bind } => server::serve(lookup_from_config()?, bind).await,
        }
    }
}

fn lookup_from_config() -> Result<WeatherLookup> {
    let settings = Config::load_with_env()?.api_settings()?;
    Ok(WeatherLookup::with_defaults(settings))
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let mut key_prompt = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked);
    if cfg.is_configured() {
        key_prompt = key_prompt.with_help_message("leave empty to keep the stored key");
    }
    let api_key = key_prompt.prompt()?;

    let api_path =
        Text::new("API path:").with_default(cfg.api_path_or_default()).prompt()?;

    let api_key = api_key.trim();
    if !api_key.is_empty() {
        cfg.api_key = Some(api_key.to_string());
    } else if !cfg.is_configured() {
        return Err(anyhow!("An API key is required; nothing was saved."));
    }
    cfg.api_path = Some(api_path.trim().to_string());

    let path = cfg.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(query: WeatherQuery) -> Result<()> {
    let lookup = lookup_from_config()?;

    let report = lookup
        .lookup(&query.city)
        .await
        .map_err(|err| anyhow!("Weather lookup for '{}' failed: {err}", query.city))?;

    print!("{}", format_report(&report));
    Ok(())
}

fn format_report(report: &WeatherReport) -> String {
    format!(
        "{}, {}\n  Temperature:  {:.1} °C\n  Condition:    {}\n  Humidity:     {}%\n  Wind:         {} km/h\n  Last updated: {}\n",
        report.city,
        report.country,
        report.temperature,
        report.condition,
        report.humidity,
        report.wind_speed,
        report.last_updated,
    )
}
