//! Session shape returned by `session-get`.

use serde::{Deserialize, Serialize};

use crate::{number::integer, shape::Shape};

/// Transmission session settings and daemon information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Session {
    /// Max global download speed when alt speeds are on (KBps).
    #[serde(deserialize_with = "integer")]
    pub alt_speed_down: i64,
    /// Whether the alt speeds are in use.
    pub alt_speed_enabled: bool,
    /// When to turn on alt speeds, in minutes after midnight.
    #[serde(deserialize_with = "integer")]
    pub alt_speed_time_begin: i64,
    /// Day mask for the alt speed schedule.
    #[serde(deserialize_with = "integer")]
    pub alt_speed_time_day: i64,
    /// Whether the alt speed schedule is used.
    pub alt_speed_time_enabled: bool,
    /// When to turn off alt speeds, in minutes after midnight.
    #[serde(deserialize_with = "integer")]
    pub alt_speed_time_end: i64,
    /// Max global upload speed when alt speeds are on (KBps).
    #[serde(deserialize_with = "integer")]
    pub alt_speed_up: i64,
    /// Whether the blocklist is enabled.
    pub blocklist_enabled: bool,
    /// Number of rules in the blocklist.
    #[serde(deserialize_with = "integer")]
    pub blocklist_size: i64,
    /// Location of the blocklist used by `blocklist-update`.
    pub blocklist_url: String,
    /// Maximum size of the disk cache (MB).
    #[serde(deserialize_with = "integer")]
    pub cache_size_mb: i64,
    /// Transmission's configuration directory.
    pub config_dir: String,
    /// Whether DHT is allowed in public torrents.
    pub dht_enabled: bool,
    /// Default download path.
    pub download_dir: String,
    /// Free space in the download directory, in bytes.
    #[serde(deserialize_with = "integer")]
    pub download_dir_free_space: i64,
    /// Whether the download queue is limited.
    pub download_queue_enabled: bool,
    /// Max number of torrents downloading at once.
    #[serde(deserialize_with = "integer")]
    pub download_queue_size: i64,
    /// `required`, `preferred` or `tolerated`.
    pub encryption: String,
    /// Idle time after which seeding torrents stop (minutes).
    #[serde(deserialize_with = "integer")]
    pub idle_seeding_limit: i64,
    /// Whether the idle seeding limit is honored by default.
    pub idle_seeding_limit_enabled: bool,
    /// Path for incomplete torrents.
    pub incomplete_dir: String,
    /// Whether torrents stay in `incomplete-dir` until done.
    pub incomplete_dir_enabled: bool,
    /// Whether Local Peer Discovery is allowed in public torrents.
    pub lpd_enabled: bool,
    /// Maximum global number of peers.
    #[serde(deserialize_with = "integer")]
    pub peer_limit_global: i64,
    /// Maximum number of peers per torrent.
    #[serde(deserialize_with = "integer")]
    pub peer_limit_per_torrent: i64,
    /// Peer port.
    #[serde(deserialize_with = "integer")]
    pub peer_port: i64,
    /// Whether a random peer port is picked on launch.
    pub peer_port_random_on_start: bool,
    /// Whether PEX is allowed in public torrents.
    pub pex_enabled: bool,
    /// Whether port forwarding is enabled.
    pub port_forwarding_enabled: bool,
    /// Whether idle torrents are considered stalled.
    pub queue_stalled_enabled: bool,
    /// Minutes of idleness after which a torrent stops counting towards the queues.
    #[serde(deserialize_with = "integer")]
    pub queue_stalled_minutes: i64,
    /// Whether `.part` is appended to incomplete files.
    pub rename_partial_files: bool,
    /// Current RPC API version.
    #[serde(deserialize_with = "integer")]
    pub rpc_version: i64,
    /// Minimum supported RPC API version.
    #[serde(deserialize_with = "integer")]
    pub rpc_version_minimum: i64,
    /// Whether the "torrent done" script runs.
    pub script_torrent_done_enabled: bool,
    /// Filename of the "torrent done" script.
    pub script_torrent_done_filename: String,
    /// Whether the seed queue is limited.
    pub seed_queue_enabled: bool,
    /// Max number of torrents seeding at once.
    #[serde(deserialize_with = "integer")]
    pub seed_queue_size: i64,
    /// Default seed ratio for torrents.
    #[serde(rename = "seedRatioLimit")]
    pub seed_ratio_limit: f64,
    /// Whether `seedRatioLimit` is honored by default.
    #[serde(rename = "seedRatioLimited")]
    pub seed_ratio_limited: bool,
    /// The current session id.
    pub session_id: String,
    /// Max global download speed (KBps).
    #[serde(deserialize_with = "integer")]
    pub speed_limit_down: i64,
    /// Whether the download speed limit is enabled.
    pub speed_limit_down_enabled: bool,
    /// Max global upload speed (KBps).
    #[serde(deserialize_with = "integer")]
    pub speed_limit_up: i64,
    /// Whether the upload speed limit is enabled.
    pub speed_limit_up_enabled: bool,
    /// Whether added torrents start right away.
    pub start_added_torrents: bool,
    /// Whether the `.torrent` file of added torrents is deleted.
    pub trash_original_torrent_files: bool,
    /// Units used by the daemon for display.
    pub units: Units,
    /// Whether uTP is allowed.
    pub utp_enabled: bool,
    /// Long version string, `"$version ($revision)"`.
    pub version: String,
}

impl Shape for Session {}

/// Display units reported by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Units {
    /// Bytes in a memory KB (1000 or 1024).
    #[serde(deserialize_with = "integer")]
    pub memory_bytes: i64,
    /// Memory unit labels.
    pub memory_units: Vec<String>,
    /// Bytes in a size KB (1000 or 1024).
    #[serde(deserialize_with = "integer")]
    pub size_bytes: i64,
    /// Size unit labels.
    pub size_units: Vec<String>,
    /// Bytes in a speed KB (1000 or 1024).
    #[serde(deserialize_with = "integer")]
    pub speed_bytes: i64,
    /// Speed unit labels.
    pub speed_units: Vec<String>,
}
