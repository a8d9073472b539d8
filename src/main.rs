use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use garden_core::{AppError, Config, ConfigError, DataSourceKind};
use garden_data::reference::find_by_name;
use garden_data::{ApiWithMockFallback, GardenApiClient, GardenDataSource, MockGardenData};
use garden_widget::{GardenZoneWidget, WidgetState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Frost dates, hardiness zone, rainfall, soil and planting calendar for a location
#[derive(Debug, Parser)]
#[command(name = "garden-zone", version)]
struct Cli {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, conflicts_with = "preset")]
    lat: Option<String>,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, conflicts_with = "preset")]
    lon: Option<String>,

    /// Named reference location, e.g. "New York"
    #[arg(long)]
    preset: Option<String>,

    /// Data source, overriding the config file
    #[arg(long)]
    source: Option<DataSourceKind>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file path (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn build_source(kind: DataSourceKind, config: &Config) -> Result<Arc<dyn GardenDataSource>> {
    let mock = MockGardenData::new().with_latency(config.data.simulate_latency);

    match kind {
        DataSourceKind::Mock => Ok(Arc::new(mock)),
        DataSourceKind::Api => {
            let client = GardenApiClient::with_timeout(
                &config.api.base_url(),
                Duration::from_secs(config.api.timeout_secs),
                &config.api.user_agent,
            )
            .context("Failed to build garden API client")?;
            tracing::info!("Using garden API at {}", client.base_url());
            Ok(Arc::new(ApiWithMockFallback::new(client, mock)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    garden_core::init()?;
    let cli = Cli::parse();

    let (config, _) = Config::load_validated(cli.config.as_deref()).map_err(|e| {
        match e.downcast::<ConfigError>() {
            Ok(config_err) => {
                let err = AppError::from(config_err);
                tracing::error!("{}", err.user_message());
                anyhow::Error::from(err)
            }
            Err(other) => other,
        }
    })?;

    let kind = cli.source.unwrap_or(config.data.source);
    let source = build_source(kind, &config)?;

    let (latitude, longitude) = match cli.preset.as_deref() {
        Some(name) => {
            let reference =
                find_by_name(name).with_context(|| format!("Unknown preset location '{}'", name))?;
            (
                Some(reference.coordinate.latitude.to_string()),
                Some(reference.coordinate.longitude.to_string()),
            )
        }
        None => (cli.lat, cli.lon),
    };

    let mut widget = GardenZoneWidget::new(source);
    if let Some(latitude) = latitude {
        widget.set_attribute("latitude", &latitude).await;
    }
    if let Some(longitude) = longitude {
        widget.set_attribute("longitude", &longitude).await;
    }
    widget.connect().await;

    match cli.format {
        OutputFormat::Text => print!("{}", widget.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(widget.state())?),
    }

    let failed = matches!(widget.state(), WidgetState::Error(_));
    widget.disconnect();
    if failed {
        bail!("Garden data could not be loaded");
    }

    Ok(())
}
