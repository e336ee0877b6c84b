//! Unari server binary.
//!
//! # Usage
//!
//! ```bash
//! # Create a host key once
//! ssh-keygen -t ed25519 -N "" -f .ssh/id_ed25519
//!
//! # Serve on the default port
//! unari-server
//!
//! # Connect
//! ssh -p 23234 localhost
//! ```

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use unari_server::{Args, Server, ServerConfig, shutdown_signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_result = dotenv::dotenv();
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    if let Err(e) = dotenv_result {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    tracing::info!("Unari server starting");

    let config = ServerConfig::try_from(args)?;
    tracing::info!(
        addr = %config.listen_addr,
        timezone = %config.timezone,
        campuses = config.campuses.len(),
        "configuration loaded"
    );

    let server = Server::bind(config).await?;
    server.run(shutdown_signal()).await?;

    tracing::info!("Unari server stopped");
    Ok(())
}
