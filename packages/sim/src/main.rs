//! Repair-shop simulation entry point.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use actors::Shop;
use shop_core::SimConfig;

/// Repair-shop pipeline simulator.
#[derive(Debug, Parser)]
#[command(name = "sim", about = "Simulate a repair-shop order pipeline")]
struct Args {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run for a fixed number of seconds instead of until Ctrl-C.
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Override the number of standard consumers.
    #[arg(long)]
    consumers: Option<u32>,

    /// Override the number of workers.
    #[arg(long)]
    workers: Option<u32>,

    /// Override the base RNG seed.
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(args: &Args) -> anyhow::Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(consumers) = args.consumers {
        config.standard_consumers = consumers;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(seed) = args.seed {
        config.base_seed = seed;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let shop = Shop::start(config).await?;

    match args.duration_secs {
        Some(secs) => {
            tracing::info!(secs, "Running for a fixed duration");
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
        None => {
            tracing::info!("Running until Ctrl-C");
            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for shutdown signal")?;
        }
    }

    shop.shutdown().await;
    Ok(())
}
