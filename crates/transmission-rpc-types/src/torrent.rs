//! Torrent shapes returned by `torrent-get` and `torrent-add`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    fields::TorrentStatus,
    number::{integer, optional_integer},
    shape::Shape,
};

/// Torrent information.
///
/// Only `id` is always present; every other field is returned only when requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct Torrent {
    #[serde(deserialize_with = "integer")]
    pub id: i64,

    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_date: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub added_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub corrupt_ever: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub desired_available: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub done_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_limited: Option<bool>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub downloaded_ever: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_string: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub eta: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub eta_idle: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_stats: Option<Vec<FileStat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<TorrentFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_string: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub have_unchecked: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub have_valid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honors_session_limits: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_finished: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_stalled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Value>>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub left_until_done: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet_link: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_announce_time: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_connected_peers: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_percent_complete: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "peer-limit", default, skip_serializing_if = "Option::is_none")]
    pub peer_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peers: Option<Vec<Value>>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub peers_connected: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peers_from: Option<PeersFrom>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub peers_getting_from_us: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub peers_sending_to_us: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_done: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorities: Option<Vec<i64>>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub queue_position: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate_download: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate_upload: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recheck_progress: Option<f64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub seconds_downloading: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub seconds_seeding: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub seed_idle_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limit: Option<f64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub seed_ratio_mode: Option<i64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub size_when_done: Option<i64>,
    /// Unknown status codes are dropped.
    #[serde(
        default,
        deserialize_with = "status_from_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<TorrentStatus>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trackers: Option<Vec<Tracker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_ratio: Option<f64>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub uploaded_ever: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wanted: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webseeds: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub webseeds_sending_to_us: Option<i64>,
}

fn status_from_code<'de, D>(deserializer: D) -> Result<Option<TorrentStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = optional_integer(deserializer)?;
    Ok(code.and_then(TorrentStatus::from_code))
}

/// Per-file download statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FileStat {
    #[serde(deserialize_with = "integer")]
    pub bytes_completed: i64,
    #[serde(deserialize_with = "integer")]
    pub priority: i64,
    pub wanted: bool,
}

/// A file contained in a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TorrentFile {
    #[serde(deserialize_with = "integer")]
    pub bytes_completed: i64,
    #[serde(deserialize_with = "integer")]
    pub length: i64,
    pub name: String,
}

/// How many connected peers came from each discovery source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PeersFrom {
    #[serde(deserialize_with = "integer")]
    pub from_cache: i64,
    #[serde(deserialize_with = "integer")]
    pub from_dht: i64,
    #[serde(deserialize_with = "integer")]
    pub from_incoming: i64,
    #[serde(deserialize_with = "integer")]
    pub from_lpd: i64,
    #[serde(deserialize_with = "integer")]
    pub from_ltep: i64,
    #[serde(deserialize_with = "integer")]
    pub from_pex: i64,
    #[serde(deserialize_with = "integer")]
    pub from_tracker: i64,
}

/// A tracker announced by a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Tracker {
    pub announce: String,
    #[serde(deserialize_with = "integer")]
    pub id: i64,
    pub scrape: String,
    #[serde(deserialize_with = "integer")]
    pub tier: i64,
}

/// Arguments of a `torrent-get` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentList {
    /// Ids of torrents removed since the last `recently-active` query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<Vec<i64>>,
    /// The requested torrents.
    pub torrents: Vec<Torrent>,
}

impl Shape for TorrentList {}

/// Identity of a torrent returned by `torrent-add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TorrentAdd {
    pub hash_string: String,
    #[serde(deserialize_with = "integer")]
    pub id: i64,
    pub name: String,
}

/// Arguments of a `torrent-add` response.
///
/// Transmission answers with `torrent-added` for a new torrent and `torrent-duplicate` when the
/// torrent was already present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TorrentAdded {
    /// The newly added torrent.
    #[serde(rename = "torrent-added", default, skip_serializing_if = "Option::is_none")]
    pub added: Option<TorrentAdd>,
    /// The torrent that was already present.
    #[serde(
        rename = "torrent-duplicate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub duplicate: Option<TorrentAdd>,
}

impl TorrentAdded {
    /// The added torrent, or the duplicate if the torrent was already present.
    pub fn into_torrent(self) -> Option<TorrentAdd> {
        self.added.or(self.duplicate)
    }
}

impl Shape for TorrentAdded {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validate;

    #[test]
    fn torrent_with_only_id() {
        let torrent: Torrent = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert_eq!(torrent.id, 3);
        assert_eq!(torrent.name, None);
        assert_eq!(torrent.status, None);
    }

    #[test]
    fn integral_floats_decode_as_integers() {
        let torrent: Torrent = serde_json::from_value(json!({
            "id": 3.0,
            "totalSize": 2.0,
            "status": 4.0,
            "peersFrom": {
                "fromCache": 0, "fromDht": 1.0, "fromIncoming": 0, "fromLpd": 0,
                "fromLtep": 0, "fromPex": 0, "fromTracker": 2
            }
        }))
        .unwrap();
        assert_eq!(torrent.id, 3);
        assert_eq!(torrent.total_size, Some(2));
        assert_eq!(torrent.status, Some(TorrentStatus::Downloading));
        assert_eq!(torrent.peers_from.map(|p| p.from_dht), Some(1));
    }

    #[test]
    fn fractional_integer_field_is_a_mismatch() {
        let err = validate::<TorrentList>(json!({
            "result": "success",
            "arguments": { "torrents": [{ "id": 1, "eta": 2.5 }] }
        }))
        .unwrap_err();
        assert!(err.mismatches[0].contains("expected an integer, got 2.5"));
    }

    #[test]
    fn torrent_fields_and_status() {
        let torrent: Torrent = serde_json::from_value(json!({
            "id": 19,
            "name": "Some Dummy Torrent",
            "hashString": "803f75f2673f18365b2123fecaeca5ed70cb11ffa",
            "peer-limit": 50,
            "percentDone": 0.9157,
            "metadataPercentComplete": 1,
            "status": 4,
            "eta": 10589,
            "etaIdle": -1,
            "labels": [],
            "trackers": [{ "announce": "udp://tracker:80", "id": 0, "scrape": "", "tier": 0 }],
            "peersFrom": {
                "fromCache": 0, "fromDht": 2, "fromIncoming": 0, "fromLpd": 0,
                "fromLtep": 0, "fromPex": 1, "fromTracker": 2
            }
        }))
        .unwrap();

        assert_eq!(torrent.peer_limit, Some(50));
        assert_eq!(torrent.status, Some(TorrentStatus::Downloading));
        assert_eq!(torrent.metadata_percent_complete, Some(1.0));
        assert_eq!(torrent.eta_idle, Some(-1));
        assert_eq!(torrent.trackers.as_ref().map(Vec::len), Some(1));
        assert_eq!(torrent.peers_from.map(|p| p.from_tracker), Some(2));
    }

    #[test]
    fn unknown_status_is_dropped() {
        let torrent: Torrent = serde_json::from_value(json!({ "id": 1, "status": 42 })).unwrap();
        assert_eq!(torrent.status, None);
    }

    #[test]
    fn torrent_without_id_is_invalid() {
        let err = validate::<TorrentList>(json!({
            "result": "success",
            "arguments": { "torrents": [{ "name": "nameless" }] }
        }))
        .unwrap_err();
        assert!(err.mismatches[0].contains("missing field `id`"));
    }

    #[test]
    fn torrent_added_prefers_added_entry() {
        let added: TorrentAdded = serde_json::from_value(json!({
            "torrent-duplicate": { "hashString": "b", "id": 2, "name": "dup" }
        }))
        .unwrap();
        assert_eq!(added.into_torrent().map(|t| t.id), Some(2));

        let err = validate::<TorrentAdded>(json!({
            "result": "success",
            "arguments": { "torrent-removed": {} }
        }))
        .unwrap_err();
        assert!(err.mismatches[0].contains("unknown field"));
    }
}
