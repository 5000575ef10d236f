//! Social API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p social-api
//! ```
//!
//! Configuration is loaded from environment variables and `.env`.

use anyhow::Context;
use social_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = ?e, "Server failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env))
    {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting Social API Server"
    );

    social_api::run(config).await?;

    Ok(())
}
