//! Torrent field catalog and status labels.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

macro_rules! torrent_fields {
    ($($variant:ident => $name:literal,)+) => {
        /// Fields that can be requested with `torrent-get`.
        ///
        /// The names are the `torrent-get` keys of the Transmission RPC protocol.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum TorrentField {
            $($variant,)+
        }

        impl TorrentField {
            /// Every known field, in catalog order.
            pub const ALL: &'static [TorrentField] = &[$(TorrentField::$variant,)+];

            /// The wire name of the field.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(TorrentField::$variant => $name,)+
                }
            }
        }

        impl FromStr for TorrentField {
            type Err = UnknownTorrentField;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(TorrentField::$variant),)+
                    other => Err(UnknownTorrentField(other.to_string())),
                }
            }
        }
    };
}

torrent_fields! {
    Id => "id",
    AddedDate => "addedDate",
    Creator => "creator",
    DoneDate => "doneDate",
    Comment => "comment",
    Name => "name",
    TotalSize => "totalSize",
    Error => "error",
    ErrorString => "errorString",
    Eta => "eta",
    EtaIdle => "etaIdle",
    IsFinished => "isFinished",
    IsStalled => "isStalled",
    IsPrivate => "isPrivate",
    Files => "files",
    FileStats => "fileStats",
    HashString => "hashString",
    LeftUntilDone => "leftUntilDone",
    MetadataPercentComplete => "metadataPercentComplete",
    Peers => "peers",
    PeersFrom => "peersFrom",
    PeersConnected => "peersConnected",
    PeersGettingFromUs => "peersGettingFromUs",
    PeersSendingToUs => "peersSendingToUs",
    PercentDone => "percentDone",
    QueuePosition => "queuePosition",
    RateDownload => "rateDownload",
    RateUpload => "rateUpload",
    SecondsDownloading => "secondsDownloading",
    RecheckProgress => "recheckProgress",
    SeedRatioMode => "seedRatioMode",
    SeedRatioLimit => "seedRatioLimit",
    SeedIdleLimit => "seedIdleLimit",
    SizeWhenDone => "sizeWhenDone",
    Status => "status",
    Trackers => "trackers",
    DownloadDir => "downloadDir",
    DownloadLimit => "downloadLimit",
    DownloadLimited => "downloadLimited",
    UploadedEver => "uploadedEver",
    DownloadedEver => "downloadedEver",
    CorruptEver => "corruptEver",
    UploadRatio => "uploadRatio",
    WebseedsSendingToUs => "webseedsSendingToUs",
    HaveUnchecked => "haveUnchecked",
    HaveValid => "haveValid",
    HonorsSessionLimits => "honorsSessionLimits",
    ManualAnnounceTime => "manualAnnounceTime",
    ActivityDate => "activityDate",
    DesiredAvailable => "desiredAvailable",
    Labels => "labels",
    MagnetLink => "magnetLink",
    MaxConnectedPeers => "maxConnectedPeers",
    PeerLimit => "peer-limit",
    Priorities => "priorities",
    Wanted => "wanted",
    Webseeds => "webseeds",
}

impl fmt::Display for TorrentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TorrentField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Returned when parsing a name that is not in the [`TorrentField`] catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown torrent field: {0}")]
pub struct UnknownTorrentField(pub String);

/// Torrent activity status, as reported in the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TorrentStatus {
    /// Torrent is stopped.
    Stopped,
    /// Queued to check files.
    QueuedCheck,
    /// Checking files.
    Checking,
    /// Queued to download.
    QueuedDownload,
    /// Downloading.
    Downloading,
    /// Queued to seed.
    QueuedSeed,
    /// Seeding.
    Seeding,
}

impl TorrentStatus {
    /// Maps a numeric status code to its label. Unknown codes yield `None`.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Stopped),
            1 => Some(Self::QueuedCheck),
            2 => Some(Self::Checking),
            3 => Some(Self::QueuedDownload),
            4 => Some(Self::Downloading),
            5 => Some(Self::QueuedSeed),
            6 => Some(Self::Seeding),
            _ => None,
        }
    }

    /// The numeric status code.
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// The upper-case label, e.g. `QUEUED_DOWNLOAD`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stopped => "STOPPED",
            Self::QueuedCheck => "QUEUED_CHECK",
            Self::Checking => "CHECKING",
            Self::QueuedDownload => "QUEUED_DOWNLOAD",
            Self::Downloading => "DOWNLOADING",
            Self::QueuedSeed => "QUEUED_SEED",
            Self::Seeding => "SEEDING",
        }
    }
}

impl fmt::Display for TorrentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
