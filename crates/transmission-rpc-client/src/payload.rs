//! Method options and the request payloads they map to.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::Serialize;

use transmission_rpc_types::{TorrentField, TransmissionError};

pub(crate) const SESSION_GET: &str = "session-get";
pub(crate) const TORRENT_ADD: &str = "torrent-add";
pub(crate) const TORRENT_GET: &str = "torrent-get";
pub(crate) const TORRENT_REMOVE: &str = "torrent-remove";
pub(crate) const TORRENT_START: &str = "torrent-start";
pub(crate) const TORRENT_START_NOW: &str = "torrent-start-now";
pub(crate) const TORRENT_STOP: &str = "torrent-stop";

const RECENTLY_ACTIVE: &str = "recently-active";

/// Identifies a torrent, either by numeric id or by info hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TorrentId {
    /// Session-local numeric id.
    Id(i64),
    /// Hex info hash.
    Hash(String),
}

impl From<i64> for TorrentId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TorrentId {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_string())
    }
}

impl From<String> for TorrentId {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

/// Numbers parse as ids, anything else as a hash.
impl FromStr for TorrentId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Self::Id)
            .unwrap_or_else(|_| Self::Hash(s.to_string())))
    }
}

impl fmt::Display for TorrentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Hash(hash) => f.write_str(hash),
        }
    }
}

/// Options for [`list_torrents`](crate::TransmissionClient::list_torrents).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTorrentsOptions {
    /// Torrents to list; all torrents when `None`.
    pub ids: Option<Vec<TorrentId>>,
    /// Fields to fetch; [`TorrentField::ALL`] when `None`.
    pub fields: Option<Vec<TorrentField>>,
}

/// Options for [`add_magnet`](crate::TransmissionClient::add_magnet).
///
/// Without `download_dir` the daemon's default download directory is used. Torrents are added
/// started unless `paused` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddMagnetOptions {
    /// The magnet link.
    #[serde(rename = "filename")]
    pub magnet: String,
    /// Where to download the torrent.
    #[serde(rename = "download-dir", skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
    /// Add the torrent paused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    /// Labels to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Torrent bandwidth priority (-1 low, 0 normal, 1 high).
    #[serde(rename = "bandwidthPriority", skip_serializing_if = "Option::is_none")]
    pub bandwidth_priority: Option<i64>,
    /// Maximum number of peers.
    #[serde(rename = "peer-limit", skip_serializing_if = "Option::is_none")]
    pub peer_limit: Option<i64>,
    /// Cookies for the tracker, as a `NAME=CONTENTS` list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
}

impl AddMagnetOptions {
    /// Options adding `magnet` with the daemon defaults.
    pub fn new(magnet: impl Into<String>) -> Self {
        Self {
            magnet: magnet.into(),
            ..Default::default()
        }
    }
}

/// Options for [`remove_torrents`](crate::TransmissionClient::remove_torrents).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoveTorrentsOptions {
    /// Torrents to remove.
    pub ids: Vec<TorrentId>,
    /// Also delete downloaded data.
    #[serde(rename = "delete-local-data")]
    pub delete_local_data: bool,
}

/// Options for [`start_torrents`](crate::TransmissionClient::start_torrents).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartTorrentsOptions {
    /// Torrents to start; all torrents when `None`.
    pub ids: Option<Vec<TorrentId>>,
    /// Start immediately, bypassing the queue (`torrent-start-now`).
    pub now: bool,
}

/// Options for [`stop_torrents`](crate::TransmissionClient::stop_torrents).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopTorrentsOptions {
    /// Torrents to stop; all torrents when `None`.
    pub ids: Option<Vec<TorrentId>>,
}

/// `{ "method": ..., "arguments": ... }`
#[derive(Debug, Serialize)]
pub(crate) struct Payload<'a, A> {
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    arguments: Option<A>,
}

impl<'a> Payload<'a, ()> {
    pub(crate) fn bare(method: &'a str) -> Self {
        Self {
            method,
            arguments: None,
        }
    }
}

impl<'a, A: Serialize> Payload<'a, A> {
    pub(crate) fn new(method: &'a str, arguments: A) -> Self {
        Self {
            method,
            arguments: Some(arguments),
        }
    }

    pub(crate) fn to_body(&self) -> Result<String, TransmissionError> {
        serde_json::to_string(self).map_err(|e| {
            TransmissionError::Config(format!("unable to serialize {} request: {e}", self.method))
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum IdSelection<'a> {
    List(&'a [TorrentId]),
    Keyword(&'static str),
}

impl IdSelection<'_> {
    pub(crate) const RECENTLY_ACTIVE: Self = Self::Keyword(RECENTLY_ACTIVE);
}

#[derive(Debug, Serialize)]
pub(crate) struct TorrentGetArguments<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ids: Option<IdSelection<'a>>,
    pub(crate) fields: &'a [TorrentField],
}

/// Arguments of `torrent-start`, `torrent-start-now` and `torrent-stop`.
#[derive(Debug, Serialize)]
pub(crate) struct TorrentActionArguments<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ids: Option<&'a [TorrentId]>,
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn body<A: Serialize>(payload: Payload<'_, A>) -> Value {
        serde_json::from_str(&payload.to_body().unwrap()).unwrap()
    }

    #[test]
    fn bare_payload_has_no_arguments() {
        assert_eq!(
            Payload::bare(SESSION_GET).to_body().unwrap(),
            r#"{"method":"session-get"}"#
        );
    }

    #[test]
    fn torrent_ids_serialize_untagged() {
        let ids: Vec<TorrentId> = vec![1.into(), "abc".into()];
        assert_eq!(serde_json::to_value(&ids).unwrap(), json!([1, "abc"]));
    }

    #[test]
    fn torrent_id_parsing() {
        assert_eq!("42".parse::<TorrentId>(), Ok(TorrentId::Id(42)));
        assert_eq!(
            "803f75f2".parse::<TorrentId>(),
            Ok(TorrentId::Hash("803f75f2".to_string()))
        );
        assert_eq!(TorrentId::Id(7).to_string(), "7");
    }

    #[test]
    fn add_magnet_skips_unset_options() {
        let options = AddMagnetOptions::new("magnet:?xt=urn:btih:abc");
        assert_eq!(
            body(Payload::new(TORRENT_ADD, &options)),
            json!({
                "method": "torrent-add",
                "arguments": { "filename": "magnet:?xt=urn:btih:abc" }
            })
        );
    }

    #[test]
    fn add_magnet_renames_options() {
        let options = AddMagnetOptions {
            download_dir: Some("/downloads".into()),
            paused: Some(true),
            labels: Some(vec!["linux".into()]),
            bandwidth_priority: Some(1),
            peer_limit: Some(20),
            cookies: Some("a=b".into()),
            ..AddMagnetOptions::new("magnet:?xt=urn:btih:abc")
        };
        assert_eq!(
            body(Payload::new(TORRENT_ADD, &options))["arguments"],
            json!({
                "filename": "magnet:?xt=urn:btih:abc",
                "download-dir": "/downloads",
                "paused": true,
                "labels": ["linux"],
                "bandwidthPriority": 1,
                "peer-limit": 20,
                "cookies": "a=b"
            })
        );
    }

    #[test]
    fn torrent_get_with_keyword_ids() {
        let arguments = TorrentGetArguments {
            ids: Some(IdSelection::RECENTLY_ACTIVE),
            fields: &[TorrentField::Id, TorrentField::Name],
        };
        assert_eq!(
            body(Payload::new(TORRENT_GET, arguments))["arguments"],
            json!({ "ids": "recently-active", "fields": ["id", "name"] })
        );
    }

    #[test]
    fn action_without_ids_sends_empty_arguments() {
        let arguments = TorrentActionArguments { ids: None };
        assert_eq!(
            body(Payload::new(TORRENT_STOP, arguments)),
            json!({ "method": "torrent-stop", "arguments": {} })
        );
    }
}
