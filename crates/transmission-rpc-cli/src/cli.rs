use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use transmission_rpc_client::{ClientConfig, Protocol, TorrentId};
use transmission_rpc_types::TorrentField;

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(name = "transmission-rpc", version, about, long_about = None)]
pub struct Cli {
    /// Connection settings, overriding the `TRANSMISSION_*` environment variables.
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// The RPC call to make.
    #[command(subcommand)]
    pub command: Command,
}

/// Connection flags. Unset flags keep the value from the environment or the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ConnectionArgs {
    /// Daemon host name.
    #[arg(long, global = true)]
    pub hostname: Option<String>,

    /// Daemon RPC port.
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// URL scheme, `http` or `https`.
    #[arg(long, global = true)]
    pub protocol: Option<Protocol>,

    /// Path of the RPC endpoint.
    #[arg(long, global = true)]
    pub pathname: Option<String>,

    /// Basic auth user name.
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Basic auth password.
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Retries after a session conflict before giving up.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Pause between a session conflict and its retry, in milliseconds.
    #[arg(long, global = true)]
    pub retry_delay_ms: Option<u64>,

    /// HTTP timeout, in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Applies the flags that were given on top of `config`.
    pub fn apply(self, mut config: ClientConfig) -> ClientConfig {
        if let Some(hostname) = self.hostname {
            config.hostname = hostname;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(protocol) = self.protocol {
            config.protocol = protocol;
        }
        if let Some(pathname) = self.pathname {
            config.pathname = pathname;
        }
        if let Some(username) = self.username {
            config.username = username;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if let Some(max_retries) = self.max_retries {
            config.retry.max_retries = max_retries;
        }
        if let Some(delay) = self.retry_delay_ms {
            config.retry.delay = Duration::from_millis(delay);
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout = Some(Duration::from_secs(timeout));
        }
        config
    }
}

/// RPC calls exposed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Check that the daemon answers.
    Ping,

    /// Show the session settings.
    Session,

    /// List torrents.
    List {
        /// Torrent id or hash; all torrents when omitted.
        #[arg(long = "id")]
        ids: Vec<TorrentId>,

        /// Field to fetch; all fields when omitted.
        #[arg(long = "field")]
        fields: Vec<TorrentField>,
    },

    /// List the torrents active since the last call, and the ones removed.
    Recent {
        /// Field to fetch; all fields when omitted.
        #[arg(long = "field")]
        fields: Vec<TorrentField>,
    },

    /// Add a torrent from a magnet link.
    AddMagnet {
        /// The magnet link.
        magnet: String,

        /// Download directory; the daemon default when omitted.
        #[arg(long)]
        download_dir: Option<String>,

        /// Add the torrent without starting it.
        #[arg(long)]
        paused: bool,
    },

    /// Remove torrents.
    Remove {
        /// Torrent ids or hashes.
        #[arg(required = true)]
        ids: Vec<TorrentId>,

        /// Also delete the downloaded data.
        #[arg(long)]
        delete_local_data: bool,
    },

    /// Start torrents; all of them when no id is given.
    Start {
        /// Torrent ids or hashes.
        ids: Vec<TorrentId>,

        /// Bypass the download queue.
        #[arg(long)]
        now: bool,
    },

    /// Stop torrents; all of them when no id is given.
    Stop {
        /// Torrent ids or hashes.
        ids: Vec<TorrentId>,
    },
}
