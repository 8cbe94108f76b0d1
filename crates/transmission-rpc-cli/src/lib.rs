//! # Transmission RPC command line client
//!
//! Maps the [`Command`]s parsed by [`Cli`] onto [`TransmissionClient`] calls and renders their
//! results as JSON.
//!
//! ## Example
//!
//! ```rust,ignore
//! use clap::Parser;
//! use transmission_rpc_cli::{Cli, run};
//! use transmission_rpc_client::{ClientConfig, TransmissionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cli = Cli::parse();
//!     let config = cli.connection.apply(ClientConfig::from_env()?);
//!     let client = TransmissionClient::new(&config)?;
//!     println!("{}", run(&client, cli.command).await?);
//!     Ok(())
//! }
//! ```

use std::error::Error as StdError;

use dotenvy as _;
use serde_json::{Value, json};
use thiserror::Error;
use tokio as _;
use tracing::debug;
use tracing_subscriber as _;

use transmission_rpc_client::{
    AddMagnetOptions, ListTorrentsOptions, RemoveTorrentsOptions, RpcRequest,
    StartTorrentsOptions, StopTorrentsOptions, TransmissionClient,
};
use transmission_rpc_types::TransmissionError;

mod cli;

pub use cli::{Cli, Command, ConnectionArgs};

/// Error variants for [`run`].
#[derive(Error, Debug)]
pub enum Error {
    /// The RPC call failed.
    #[error(transparent)]
    Transmission(#[from] TransmissionError),

    /// The result could not be rendered as JSON.
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Runs `command` against the daemon and returns its result as JSON.
///
/// Calls without a result (`remove`, `start`, `stop`, `ping`) yield `{"result": "success"}`.
pub async fn run<R: RpcRequest>(
    client: &TransmissionClient<R>,
    command: Command,
) -> Result<Value, Error> {
    debug!("Running {command:?}");
    let output = match command {
        Command::Ping => {
            client.ping().await?;
            success()
        }
        Command::Session => serde_json::to_value(client.get_session().await?)?,
        Command::List { ids, fields } => {
            let torrents = client
                .list_torrents(ListTorrentsOptions {
                    ids: non_empty(ids),
                    fields: non_empty(fields),
                })
                .await?;
            serde_json::to_value(torrents)?
        }
        Command::Recent { fields } => {
            let fields = non_empty(fields);
            serde_json::to_value(client.get_recently_active_torrents(fields.as_deref()).await?)?
        }
        Command::AddMagnet {
            magnet,
            download_dir,
            paused,
        } => {
            let torrent = client
                .add_magnet(AddMagnetOptions {
                    download_dir,
                    paused: paused.then_some(true),
                    ..AddMagnetOptions::new(magnet)
                })
                .await?;
            serde_json::to_value(torrent)?
        }
        Command::Remove {
            ids,
            delete_local_data,
        } => {
            client
                .remove_torrents(RemoveTorrentsOptions {
                    ids,
                    delete_local_data,
                })
                .await?;
            success()
        }
        Command::Start { ids, now } => {
            client
                .start_torrents(StartTorrentsOptions {
                    ids: non_empty(ids),
                    now,
                })
                .await?;
            success()
        }
        Command::Stop { ids } => {
            client
                .stop_torrents(StopTorrentsOptions {
                    ids: non_empty(ids),
                })
                .await?;
            success()
        }
    };

    Ok(output)
}

/// Renders `error` and its sources on one line, skipping sources already included in the
/// message above them.
pub fn report(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut previous = message.clone();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !previous.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        previous = text;
        source = cause.source();
    }
    message
}

fn success() -> Value {
    json!({ "result": "success" })
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
