//! CLI entrypoint for city-concierge
//!
//! This is the main binary that wires together all layers using
//! dependency injection: configuration is loaded once, the providers
//! are built from it, and the briefing use case is executed for the
//! requested city.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use concierge_application::{CapabilityPort, PlanVisitUseCase};
use concierge_domain::{CapabilityKind, CityRef};
use concierge_infrastructure::{ConfigLoader, build_capabilities};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Which capability to run when not assembling a full briefing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CapabilityArg {
    Facts,
    Weather,
    Time,
}

impl From<CapabilityArg> for CapabilityKind {
    fn from(arg: CapabilityArg) -> Self {
        match arg {
            CapabilityArg::Facts => CapabilityKind::Facts,
            CapabilityArg::Weather => CapabilityKind::Weather,
            CapabilityArg::Time => CapabilityKind::Time,
        }
    }
}

#[derive(Parser)]
#[command(name = "city-concierge", version, about = "City information briefings")]
struct Cli {
    /// City to ask about
    city: String,

    /// Country to disambiguate the city (e.g. "UK", "Japan")
    #[arg(short = 'c', long)]
    country: Option<String>,

    /// Run a single capability instead of the full briefing
    #[arg(long, value_enum)]
    capability: Option<CapabilityArg>,

    /// Print the briefing as JSON (reasoning, call trace, report)
    #[arg(long)]
    json: bool,

    /// Explicit configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip configuration files and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    let city = match CityRef::try_new(cli.city) {
        Some(city) => city.with_country_opt(cli.country),
        None => anyhow::bail!("City name cannot be empty"),
    };

    info!("Starting city-concierge for {}", city);

    // === Dependency Injection ===
    let (facts, weather, time) = build_capabilities(&config);

    // Single-capability mode mirrors the individually invocable tools
    if let Some(arg) = cli.capability {
        let provider: Arc<dyn CapabilityPort> = match arg.into() {
            CapabilityKind::Facts => facts,
            CapabilityKind::Weather => weather,
            CapabilityKind::Time => time,
        };
        let outcome = provider.fetch(&city).await;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            match outcome.report_text() {
                Some(report) => println!("{}", report),
                None => println!(
                    "{} Currently unavailable",
                    CapabilityKind::from(arg).section_header()
                ),
            }
        }
        return Ok(());
    }

    let use_case = PlanVisitUseCase::new(facts, weather, time);
    let briefing = use_case.execute(&city).await;

    if cli.json {
        println!("{}", briefing.to_json());
    } else {
        println!("{}", briefing.combined_report);
    }

    Ok(())
}
