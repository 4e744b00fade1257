//! SkyBoard CLI
//!
//! Terminal dashboard for KMA current observations and short-range forecasts.

#![allow(clippy::print_stdout)]

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use application::{DashboardOptions, DashboardView, WeatherService};
use chrono::Utc;
use clap::{Parser, Subcommand};
use domain::{Region, RegionCatalog};
use infrastructure::{AppConfig, MemoryCache, WeatherAdapter, init_logging};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// SkyBoard CLI
#[derive(Parser)]
#[command(name = "skyboard")]
#[command(author, version, about = "Korean regional weather dashboard", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./skyboard.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for one region
    Show {
        /// Region name, Korean or English (default from configuration)
        #[arg(short, long)]
        region: Option<String>,

        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the supported regions
    Regions,

    /// Interactive dashboard
    ///
    /// Reads commands from stdin: `r` clears the cache and refetches, a
    /// region name switches region, an empty line redraws, `q` quits.
    Watch {
        /// Initial region (default from configuration)
        #[arg(short, long)]
        region: Option<String>,
    },
}

/// One line of input in watch mode
#[derive(Debug, PartialEq, Eq)]
enum WatchCommand<'a> {
    Quit,
    Refresh,
    Redraw,
    Switch(&'a str),
}

impl<'a> WatchCommand<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "q" | "quit" | "exit" => Self::Quit,
            "r" | "refresh" => Self::Refresh,
            "" => Self::Redraw,
            name => Self::Switch(name),
        }
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_service(config: &AppConfig) -> anyhow::Result<WeatherService> {
    let adapter = WeatherAdapter::with_config(config.weather.to_client_config())?;
    let mut service = WeatherService::new(Arc::new(adapter), Arc::new(MemoryCache::new()))
        .with_ttl(config.cache.ttl_policy());

    if let Some(timezone) = config.weather.tz() {
        service = service.with_timezone(timezone);
    }
    if !config.cache.enabled {
        service = service.with_caching_disabled();
    }

    debug!(service = ?service, "Weather service ready");
    Ok(service)
}

fn resolve_region(name: Option<&str>, config: &AppConfig) -> anyhow::Result<&'static Region> {
    let region = match name {
        Some(name) => RegionCatalog::find(name)?,
        None => config.dashboard.region()?,
    };
    Ok(region)
}

async fn show_dashboard(
    service: &WeatherService,
    region: &'static Region,
    options: &DashboardOptions,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = service.snapshot(region, Utc::now()).await;
    let view = DashboardView::build(&snapshot, options);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::dashboard(&view));
    }
    Ok(())
}

async fn watch(
    service: &WeatherService,
    mut region: &'static Region,
    options: &DashboardOptions,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    show_dashboard(service, region, options, false).await?;
    println!("\n[r] refresh  [region name] switch  [q] quit");

    while let Some(line) = lines.next_line().await? {
        match WatchCommand::parse(&line) {
            WatchCommand::Quit => break,
            WatchCommand::Refresh => {
                let removed = service.refresh().await?;
                println!("🔄 Cache cleared ({removed} entries)\n");
            },
            WatchCommand::Redraw => {},
            WatchCommand::Switch(name) => match RegionCatalog::find(name) {
                Ok(next) => region = next,
                Err(e) => {
                    println!("❌ {e}");
                    continue;
                },
            },
        }

        show_dashboard(service, region, options, false).await?;
        println!("\n[r] refresh  [region name] switch  [q] quit");
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())?;

    // -v flags override the configured filter; RUST_LOG overrides both
    let cli_filter = (cli.verbose > 0).then(|| log_filter_from_verbosity(cli.verbose));
    init_logging(&config.logging, cli_filter)?;

    match cli.command {
        Commands::Regions => {
            print!("{}", render::regions(RegionCatalog::all()));
        },

        Commands::Show { region, json } => {
            config.validate()?;
            let region = resolve_region(region.as_deref(), &config)?;
            let service = build_service(&config)?;
            show_dashboard(&service, region, &config.dashboard.options(), json).await?;
        },

        Commands::Watch { region } => {
            config.validate()?;
            let region = resolve_region(region.as_deref(), &config)?;
            let service = build_service(&config)?;
            watch(&service, region, &config.dashboard.options()).await?;
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity_zero() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
    }

    #[test]
    fn log_filter_verbosity_one() {
        assert_eq!(log_filter_from_verbosity(1), "info");
    }

    #[test]
    fn log_filter_verbosity_two() {
        assert_eq!(log_filter_from_verbosity(2), "debug");
    }

    #[test]
    fn log_filter_verbosity_three_or_more() {
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn watch_command_quit_and_refresh() {
        assert_eq!(WatchCommand::parse("q"), WatchCommand::Quit);
        assert_eq!(WatchCommand::parse(" quit "), WatchCommand::Quit);
        assert_eq!(WatchCommand::parse("r"), WatchCommand::Refresh);
        assert_eq!(WatchCommand::parse(""), WatchCommand::Redraw);
    }

    #[test]
    fn watch_command_region_switch() {
        assert_eq!(WatchCommand::parse("부산\n"), WatchCommand::Switch("부산"));
        assert_eq!(WatchCommand::parse("Seoul"), WatchCommand::Switch("Seoul"));
    }

    #[test]
    fn resolve_region_prefers_argument() {
        let config = AppConfig::default();
        let region = resolve_region(Some("Busan"), &config).expect("known region");
        assert_eq!(region.name(), "부산");

        let region = resolve_region(None, &config).expect("default region");
        assert_eq!(region.name(), "대구");
    }

    #[test]
    fn resolve_region_rejects_unknown() {
        assert!(resolve_region(Some("Atlantis"), &AppConfig::default()).is_err());
    }

    #[test]
    fn build_service_respects_cache_switch() {
        let mut config = AppConfig::default();
        config.cache.enabled = false;
        assert!(build_service(&config).is_ok());
    }
}
