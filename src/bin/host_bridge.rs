//! Headless host bridge binary for stdin/stdout JSON communication.
//!
//! Usage: `zephyr-host [CONFIG_PATH]`. Without an argument the default
//! config path is used when it exists, otherwise built-in defaults.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use std::path::PathBuf;

use anyhow::Context;
use zephyr::assistant::Assistant;
use zephyr::config::ZephyrConfig;
use zephyr::host::{HostHandler, run_stdio_bridge};

fn load_config() -> anyhow::Result<ZephyrConfig> {
    let (path, required) = match std::env::args_os().nth(1) {
        Some(arg) => (PathBuf::from(arg), true),
        None => (ZephyrConfig::default_config_path(), false),
    };

    let mut config = if required || path.exists() {
        tracing::info!(path = %path.display(), "loading config");
        ZephyrConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?
    } else {
        tracing::info!("no config file found; using defaults");
        ZephyrConfig::default()
    };
    config.apply_env_overrides();
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("zephyr-host starting");

    let config = load_config()?;
    let assistant = Assistant::from_config(config).context("invalid configuration")?;

    run_stdio_bridge(HostHandler::new(&assistant))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "zephyr-host exited with error");
            anyhow::anyhow!("zephyr-host failed: {e}")
        })?;

    tracing::info!("zephyr-host shut down cleanly");
    Ok(())
}
