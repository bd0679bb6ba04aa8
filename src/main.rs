/// Print a market status snapshot as JSON
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use tracing::{debug, info};

use market_hours::{
    config::load_config,
    utils::parse_instant,
    AssetClass, MarketCalendar,
};

#[derive(Debug, Parser)]
#[command(
    name = "market-hours",
    version,
    about = "Report whether a market is open and when it next opens and closes"
)]
struct Cli {
    /// Asset class: equity, fx, metal or crypto
    asset_class: String,

    /// RFC 3339 instant with an explicit offset (defaults to now)
    #[arg(value_parser = parse_instant)]
    instant: Option<DateTime<FixedOffset>>,

    /// Calendar data file (TOML); the built-in calendar is used otherwise
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("market_hours=info,warn")
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let asset = AssetClass::from(cli.asset_class.as_str());
    let instant = cli.instant.unwrap_or_else(|| Utc::now().fixed_offset());

    let calendar = match &cli.config {
        Some(path) => {
            let config = load_config(path).with_context(|| format!("loading {}", path.display()))?;
            MarketCalendar::from_config(&config)?
        }
        None => {
            debug!("No --config given, using built-in calendar");
            MarketCalendar::builtin()
        }
    };

    let status = calendar.status(&asset, &instant)?;
    info!(
        "{} is {} at {}",
        status.asset_class,
        if status.is_open { "open" } else { "closed" },
        status.as_of
    );

    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
