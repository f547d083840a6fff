pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{CurrencyRegistry, RateResolver};
use crate::providers::{EcbProvider, SnapshotWriter};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Rate {
        numerator: String,
        denominator: String,
    },
    Currencies,
}

/// Loads the currency registry. Any failure here is fatal for the app.
pub fn load_registry(config: &AppConfig) -> Result<Arc<CurrencyRegistry>> {
    let registry = CurrencyRegistry::load(&config.registry_path).with_context(|| {
        format!(
            "Failed to load currency registry from {}",
            config.registry_path
        )
    })?;
    Ok(Arc::new(registry))
}

pub fn build_resolver(
    config: &AppConfig,
    registry: Arc<CurrencyRegistry>,
) -> RateResolver<EcbProvider> {
    let ecb = &config.providers.ecb;
    let provider = EcbProvider::new(&ecb.base_url)
        .with_timeout(ecb.timeout())
        .with_snapshot(config.snapshot_path().map(SnapshotWriter::new));
    RateResolver::new(registry, provider)
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    verbose: bool,
) -> Result<()> {
    info!("exr starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let registry = load_registry(&config)?;

    match command {
        AppCommand::Convert { amount, from, to } => {
            let resolver = build_resolver(&config, registry);
            cli::convert::run(&resolver, &amount, &from, &to, verbose).await;
        }
        AppCommand::Rate {
            numerator,
            denominator,
        } => {
            let resolver = build_resolver(&config, registry);
            cli::rate::run(&resolver, &numerator, &denominator, verbose).await;
        }
        AppCommand::Currencies => cli::currencies::run(&registry),
    }
    Ok(())
}
