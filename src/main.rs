//! Patent Copilot - Console Entry Point
//!
//! Runs one interactive patent analysis session.

use patent_copilot::{shell, Config};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "patent_copilot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate credentials before doing any work
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e.remediation());
            return Ok(());
        }
    };

    // Top-level catch-all: log the failure chain and exit cleanly.
    if let Err(e) = shell::run(config).await {
        error!(error = ?e, "Session failed");
        println!("\nAn error occurred: {e:#}");
    }

    Ok(())
}
