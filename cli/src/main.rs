//! CLI entrypoint for mapsync
//!
//! Wires the layers together: settings, store adapter, document fetcher,
//! and the sync use case.

mod commands;

use anyhow::{Context, Result, bail};
use clap::Parser;
use commands::{Cli, Command};
use mapsync_application::{SyncInput, SyncParamsUseCase, ValueStore};
use mapsync_domain::config_urls;
use mapsync_infrastructure::{HttpConfigFetcher, RpcMapStore, SettingsLoader};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let settings = SettingsLoader::load(cli.config.as_ref())?;

    let Some(rpc_url) = settings.rpc_url else {
        bail!("No RPC endpoint configured. Set MAPSYNC_RPC_URL or rpc_url in mapsync.toml.");
    };

    // === Dependency Injection ===
    let store = Arc::new(
        RpcMapStore::new(&rpc_url, &cli.contract_address)
            .context("Failed to create Map store client")?,
    );

    match cli.command {
        Command::Set { key, value } => {
            store
                .write(&key, &value)
                .await
                .with_context(|| format!("Failed to set value for key '{key}'"))?;

            let action = if value.is_empty() { "deleted" } else { "stored" };
            info!("Successfully {} value for key '{}'", action, key);
            println!(
                "Key:   {}\nValue: {}",
                key,
                if value.is_empty() { "(deleted)" } else { &value }
            );
        }
        Command::Get { key } => {
            let value = store
                .read(&key)
                .await
                .with_context(|| format!("Failed to read value for key '{key}'"))?;

            if value.is_empty() {
                println!("Value for key '{key}': not found");
            } else {
                println!("Value for key '{key}': {value}");
            }
        }
        Command::Sync { service, env } => {
            let sources = config_urls(&settings.config_base_url, &service, env);
            let fetcher = Arc::new(HttpConfigFetcher::new());

            let use_case = SyncParamsUseCase::new(fetcher, store);
            let result = use_case.execute(SyncInput::new(sources)).await;

            // Per-item failures are absorbed into the stats, but a run that
            // could not fetch a single source reconciled nothing and must
            // fail loudly.
            if result.sources_synced == 0 {
                bail!("Could not fetch any configuration source");
            }

            if result.stats.failed > 0 {
                warn!("Sync finished with failures - {}", result.stats);
            }
            println!("Sync complete - {}", result.stats);
        }
    }

    Ok(())
}
