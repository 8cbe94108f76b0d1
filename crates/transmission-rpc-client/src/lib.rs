//! # Transmission RPC client.
//!
//! Talks to a Transmission daemon over its JSON-RPC endpoint. The session token required by the
//! daemon is fetched lazily, cached, and refreshed whenever the daemon answers `409 Conflict`.
//!
//! usage:
//!
//! ```rust,ignore
//! use transmission_rpc_client::{AddMagnetOptions, ClientConfig, ListTorrentsOptions, TransmissionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TransmissionClient::new(&ClientConfig::from_env()?)?;
//!     client.ping().await?;
//!     let added = client
//!         .add_magnet(AddMagnetOptions::new("magnet:?xt=urn:btih:..."))
//!         .await?;
//!     println!("Added torrent: {:?}", added);
//!     let torrents = client.list_torrents(ListTorrentsOptions::default()).await?;
//!     println!("{} torrents", torrents.len());
//!     Ok(())
//! }
//! ```
//!
#![recursion_limit = "256"]

#[cfg(test)]
use test_log as _;
#[cfg(test)]
use tracing_subscriber as _;

mod client;
mod config;
mod payload;
mod request;
mod session;
mod transport;

#[cfg(test)]
mod testutil;

pub use client::TransmissionClient;
pub use config::{
    ClientConfig, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, Protocol, RetryConfig, basic_auth,
};
pub use payload::{
    AddMagnetOptions, ListTorrentsOptions, RemoveTorrentsOptions, StartTorrentsOptions,
    StopTorrentsOptions, TorrentId,
};
pub use request::{RequestEngine, RpcRequest, SESSION_CONFLICT};
pub use session::{SessionManager, SessionProvider};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, SESSION_ID_HEADER};

pub use transmission_rpc_types::{
    Session, Torrent, TorrentAdd, TorrentField, TorrentList, TorrentStatus, TransmissionError,
};
