//! # Transmission RPC command line client
//!
//! ## Usage
//!
//! ```sh,ignore
//! transmission-rpc --hostname nas.local list --field id --field name --field status
//! transmission-rpc add-magnet 'magnet:?xt=urn:btih:...' --download-dir /downloads --paused
//! ```
//!
//! Connection settings are read from `TRANSMISSION_*` environment variables (a `.env` file is
//! loaded if present) and can be overridden with flags. Set `RUST_LOG=debug` to trace the RPC
//! exchanges.

use std::{error::Error, process::ExitCode};

use clap::Parser;
use thiserror as _;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transmission_rpc_types as _;

use transmission_rpc_cli::{Cli, report, run};
use transmission_rpc_client::{ClientConfig, TransmissionClient};

/// Initializes the tracing subscriber. Logs go to stderr, leaving stdout to the JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn execute(cli: Cli) -> Result<String, Box<dyn Error>> {
    let config = cli.connection.apply(ClientConfig::from_env()?);
    info!("Connecting to {}", config.endpoint()?);
    let client = TransmissionClient::new(&config)?;
    let output = run(&client, cli.command).await?;
    Ok(serde_json::to_string_pretty(&output)?)
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match execute(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", report(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}
