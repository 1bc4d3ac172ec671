//! IP Checker - public IP address tray indicator
//!
//! Entry point for the system tray application.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Result;
use ipchecker::CheckerConfig;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ipchecker=info".parse()?),
        )
        .init();

    info!("Starting IP Checker v{}", ipchecker::VERSION);

    let config = CheckerConfig::default();
    info!(config = %serde_json::to_string(&config)?, "Effective configuration");

    ipchecker::app::run(config)
}
