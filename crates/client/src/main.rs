//! Crakers client binary.
//!
//! Plays one headless session with a wandering player and logs what the
//! enemies do.
//!
//! ```bash
//! CRAKERS_SEED=7 CRAKERS_TICK_MS=0 RUST_LOG=debug cargo run -p crakers-client
//! ```

use anyhow::Result;
use crakers_client::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!("Starting Crakers client");
    tracing::debug!("Client config: {:?}", config);

    match crakers_client::run(config).await? {
        Some(outcome) => tracing::info!("Session ended: {}", outcome),
        None => tracing::info!("Session ended without a winner"),
    }
    Ok(())
}
