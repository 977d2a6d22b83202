//! launchcache - upcoming rocket launches in the terminal.
//!
//! Serves the launch list from the in-memory or on-disk cache when it can,
//! and only reaches for the network when nothing is cached or a refresh is
//! asked for.

mod args;
mod format;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use launchcache_core::{
    ApiClient, Config, ConnectivityGate, ConnectivityProbe, Dataset, DiskCache, FetchOutcome,
    MemoryCache, OfflineProbe, Orchestrator, TcpProbe, Tiers,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::Args;
use format::{format_coordinates, truncate_string};

/// Widest launch name printed before truncating.
const NAME_COLUMN_WIDTH: usize = 48;

/// Upper bound on waiting for one outcome. Covers the request timeout plus
/// the connectivity probe with room to spare.
const OUTCOME_TIMEOUT_SECS: u64 = 120;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Build every collaborator from config and wire them into an orchestrator.
fn build_orchestrator(config: &Config) -> Result<(Orchestrator, mpsc::Receiver<FetchOutcome>)> {
    let api = ApiClient::new(&config.api_base_url, config.request_timeout())
        .context("Failed to create API client")?;

    let probe: Arc<dyn ConnectivityProbe> = if config.offline_mode {
        info!("Offline mode - serving cached data only");
        Arc::new(OfflineProbe)
    } else {
        match TcpProbe::for_url(api.base_url(), config.probe_timeout()) {
            Some(probe) => Arc::new(probe),
            None => {
                warn!(url = %api.base_url(), "API URL has no host, treating network as offline");
                Arc::new(OfflineProbe)
            }
        }
    };

    let cache_dir = config.cache_dir().context("Failed to resolve cache directory")?;
    let disk = DiskCache::new(cache_dir).context("Failed to open disk cache")?;

    let tiers = Tiers {
        memory: Arc::new(MemoryCache::new()),
        disk: Arc::new(disk),
        gate: ConnectivityGate::new(probe),
        source: Arc::new(api),
    };

    Ok(Orchestrator::new(config.cache_key(), config.launch_count, tiers))
}

/// Wait for the terminal outcome of one call, reporting progress on stderr.
async fn wait_for_terminal(outcomes: &mut mpsc::Receiver<FetchOutcome>) -> Result<Dataset> {
    loop {
        let outcome = tokio::time::timeout(Duration::from_secs(OUTCOME_TIMEOUT_SECS), outcomes.recv())
            .await
            .context("Timed out waiting for launch data")?
            .context("Fetch pipeline closed unexpectedly")?;

        match outcome {
            FetchOutcome::Progress => eprintln!("Fetching launches..."),
            FetchOutcome::Success(data) => return Ok(data),
            FetchOutcome::Failure(e) => return Err(e).context("Could not load launches"),
        }
    }
}

fn print_launches(launches: &Dataset, age: Option<&str>) {
    if launches.is_empty() {
        println!("No launches found.");
    }

    for launch in launches {
        println!(
            "{:<7} {:<width$} {}",
            launch.id,
            truncate_string(&launch.name, NAME_COLUMN_WIDTH),
            launch.window_display(),
            width = NAME_COLUMN_WIDTH,
        );
        let pad = launch
            .primary_pad()
            .map(format_coordinates)
            .unwrap_or_else(|| "pad unknown".to_string());
        println!("        {} | {}", launch.rocket_name(), pad);
    }

    println!();
    println!(
        "{} launches, last updated {}",
        launches.len(),
        age.unwrap_or("never")
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args = Args::parse();

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };
    config.apply_env(|name| std::env::var(name).ok());
    if args.offline {
        config.offline_mode = true;
    }

    let (orchestrator, mut outcomes) = build_orchestrator(&config)?;

    if args.clear {
        orchestrator.invalidate().await;
        println!("Cache cleared.");
        return Ok(());
    }

    orchestrator.fetch(args.refresh);
    let mut launches = wait_for_terminal(&mut outcomes).await?;

    if let Some(ref text) = args.search {
        orchestrator.search(text);
        launches = wait_for_terminal(&mut outcomes).await?;
    }

    // Let the write-through land before the runtime shuts down
    orchestrator.flush_writes().await;

    let age = orchestrator.disk().age(orchestrator.key()).await;
    print_launches(&launches, age.as_deref());

    Ok(())
}
