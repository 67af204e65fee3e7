use anyhow::Context;
use clap::{Parser, Subcommand};
use std::{
    fs,
    path::{Path, PathBuf},
};
use weather_core::{Config, Invocation, WeatherHandler, config::DEFAULT_BASE_URL};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather proxy CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the local config file.
    Configure {
        /// API key; prompted for when omitted.
        #[arg(long)]
        api_key: Option<String>,

        /// Upstream base URL override.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Run the handler once and print its result as JSON.
    Invoke {
        #[arg(long)]
        city: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lon: Option<String>,

        /// Ask for the forecast instead of current weather.
        #[arg(long)]
        forecast: bool,

        /// Read the whole invocation from a JSON event file instead.
        #[arg(long, conflicts_with_all = ["city", "lat", "lon", "forecast"])]
        event: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key, base_url } => configure(api_key, base_url),
            Command::Invoke { city, lat, lon, forecast, event } => {
                let invocation = match event {
                    Some(path) => read_event(&path)?,
                    None => invocation_from_flags(city, lat, lon, forecast),
                };
                invoke(&invocation).await
            }
        }
    }
}

fn configure(api_key: Option<String>, base_url: Option<String>) -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => inquire::Password::new("OpenWeather API key:")
            .without_confirmation()
            .with_display_mode(inquire::PasswordDisplayMode::Masked)
            .prompt()?,
    };
    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }
    cfg.set_api_key(api_key.trim().to_string());

    if let Some(url) = base_url {
        cfg.base_url = Some(url).filter(|u| u != DEFAULT_BASE_URL);
    }

    let path = cfg.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn invoke(invocation: &Invocation) -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    tracing::debug!(path = %path.display(), "Loading configuration");
    let cfg = Config::load_from(&path)?.overlay(Config::from_env());
    let handler = WeatherHandler::from_config(&cfg);

    let result = handler.handle(invocation).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_event(path: &Path) -> anyhow::Result<Invocation> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse event file: {}", path.display()))
}

fn invocation_from_flags(
    city: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
    forecast: bool,
) -> Invocation {
    let mut invocation = Invocation::default();
    for (key, value) in [("city", city), ("lat", lat), ("lon", lon)] {
        if let Some(value) = value {
            invocation = invocation.with_param(key, value);
        }
    }
    if forecast {
        invocation = invocation.with_path("/forecast");
    }
    invocation
}
