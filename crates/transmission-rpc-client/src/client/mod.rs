//! Transmission RPC method layer.

use tracing::debug;

use transmission_rpc_types::{
    Acknowledged, PingArguments, Session, Shape, Torrent, TorrentAdd, TorrentAdded, TorrentField,
    TorrentList, TransmissionError, ValidationError, validate,
};

use crate::config::ClientConfig;
use crate::payload::{
    AddMagnetOptions, IdSelection, ListTorrentsOptions, Payload, RemoveTorrentsOptions,
    SESSION_GET, StartTorrentsOptions, StopTorrentsOptions, TORRENT_ADD, TORRENT_GET,
    TORRENT_REMOVE, TORRENT_START, TORRENT_START_NOW, TORRENT_STOP, TorrentActionArguments,
    TorrentGetArguments,
};
use crate::request::{RequestEngine, RpcRequest};


/// TransmissionClient calls the Transmission RPC methods and validates their responses.
///
/// Every method wraps its failure in [`TransmissionError::Rpc`], with the underlying error as
/// source.
#[derive(Debug)]
pub struct TransmissionClient<R: RpcRequest = RequestEngine> {
    requester: R,
}

impl TransmissionClient {
    /// Create a new TransmissionClient for the daemon described by `config`.
    ///
    /// No request is made until the first method call.
    pub fn new(config: &ClientConfig) -> Result<Self, TransmissionError> {
        Ok(Self {
            requester: RequestEngine::new(config)?,
        })
    }
}

impl<R: RpcRequest> TransmissionClient<R> {
    /// Create a TransmissionClient on top of a custom request engine.
    pub fn with_requester(requester: R) -> Self {
        Self { requester }
    }

    /// The underlying request engine.
    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// Pings the endpoint to ensure it is available and answering as expected.
    pub async fn ping(&self) -> Result<(), TransmissionError> {
        debug!("Pinging Transmission RPC endpoint");
        self.call::<PingArguments>(None)
            .await
            .map_err(|e| e.context("unable to ping the Transmission RPC endpoint"))?;
        debug!("Ping answered");
        Ok(())
    }

    /// Gets the current session: daemon information and session settings.
    pub async fn get_session(&self) -> Result<Session, TransmissionError> {
        debug!("Getting session");
        let session = async {
            let body = Payload::bare(SESSION_GET).to_body()?;
            self.call::<Session>(Some(body)).await
        }
        .await
        .map_err(|e| e.context("unable to get session info from Transmission RPC endpoint"))?;
        debug!("Session: {session:?}");

        Ok(session)
    }

    /// Lists torrents. Without ids every torrent is listed; without fields every field is
    /// fetched.
    pub async fn list_torrents(
        &self,
        options: ListTorrentsOptions,
    ) -> Result<Vec<Torrent>, TransmissionError> {
        debug!("Listing torrents {:?}", options.ids);
        let list = self
            .torrent_get(
                options.ids.as_deref().map(IdSelection::List),
                options.fields.as_deref(),
            )
            .await
            .map_err(|e| e.context("unable to get torrents from Transmission RPC endpoint"))?;
        debug!("Listed {} torrents", list.torrents.len());

        Ok(list.torrents)
    }

    /// Fetches the torrents active since the last such query, along with the ids of torrents
    /// removed in the meantime.
    pub async fn get_recently_active_torrents(
        &self,
        fields: Option<&[TorrentField]>,
    ) -> Result<TorrentList, TransmissionError> {
        debug!("Getting recently active torrents");
        let list = self
            .torrent_get(Some(IdSelection::RECENTLY_ACTIVE), fields)
            .await
            .map_err(|e| {
                e.context("unable to get recently active torrents from Transmission RPC endpoint")
            })?;
        debug!(
            "Recently active: {} torrents, {} removed",
            list.torrents.len(),
            list.removed.as_ref().map_or(0, Vec::len)
        );

        Ok(list)
    }

    /// Adds a magnet link and returns the added torrent, or the existing one if the daemon
    /// already had it.
    pub async fn add_magnet(
        &self,
        options: AddMagnetOptions,
    ) -> Result<TorrentAdd, TransmissionError> {
        debug!("Adding magnet {}", options.magnet);
        let torrent = async {
            let body = Payload::new(TORRENT_ADD, &options).to_body()?;
            self.call::<TorrentAdded>(Some(body))
                .await?
                .into_torrent()
                .ok_or_else(|| {
                    TransmissionError::InvalidResponse(ValidationError::new(vec![
                        "arguments: expected `torrent-added` or `torrent-duplicate`".to_string(),
                    ]))
                })
        }
        .await
        .map_err(|e| {
            e.context(format!(
                "unable to add magnet to Transmission RPC endpoint: {}",
                options.magnet
            ))
        })?;
        debug!("Added {torrent:?}");

        Ok(torrent)
    }

    /// Removes torrents, optionally deleting their downloaded data.
    pub async fn remove_torrents(
        &self,
        options: RemoveTorrentsOptions,
    ) -> Result<(), TransmissionError> {
        debug!(
            "Removing torrents {:?}, delete_local_data={}",
            options.ids, options.delete_local_data
        );
        self.acknowledged(Payload::new(TORRENT_REMOVE, &options))
            .await
            .map_err(|e| e.context("unable to remove torrents from the Transmission RPC endpoint"))?;
        debug!("Remove command sent");
        Ok(())
    }

    /// Starts torrents; all of them when no ids are given. With `now` the queue is bypassed.
    pub async fn start_torrents(
        &self,
        options: StartTorrentsOptions,
    ) -> Result<(), TransmissionError> {
        debug!("Starting torrents {:?}, now={}", options.ids, options.now);
        let method = if options.now {
            TORRENT_START_NOW
        } else {
            TORRENT_START
        };
        let arguments = TorrentActionArguments {
            ids: options.ids.as_deref(),
        };
        self.acknowledged(Payload::new(method, arguments))
            .await
            .map_err(|e| e.context("unable to start torrents in the Transmission RPC endpoint"))?;
        debug!("Start command sent");
        Ok(())
    }

    /// Stops torrents; all of them when no ids are given.
    pub async fn stop_torrents(&self, options: StopTorrentsOptions) -> Result<(), TransmissionError> {
        debug!("Stopping torrents {:?}", options.ids);
        let arguments = TorrentActionArguments {
            ids: options.ids.as_deref(),
        };
        self.acknowledged(Payload::new(TORRENT_STOP, arguments))
            .await
            .map_err(|e| e.context("unable to stop torrents in the Transmission RPC endpoint"))?;
        debug!("Stop command sent");
        Ok(())
    }

    async fn torrent_get(
        &self,
        ids: Option<IdSelection<'_>>,
        fields: Option<&[TorrentField]>,
    ) -> Result<TorrentList, TransmissionError> {
        let arguments = TorrentGetArguments {
            ids,
            fields: fields.unwrap_or(TorrentField::ALL),
        };
        let body = Payload::new(TORRENT_GET, arguments).to_body()?;
        self.call(Some(body)).await
    }

    async fn acknowledged<A: serde::Serialize>(
        &self,
        payload: Payload<'_, A>,
    ) -> Result<(), TransmissionError> {
        let body = payload.to_body()?;
        self.call::<Acknowledged>(Some(body)).await?;
        Ok(())
    }

    /// Sends `body` and validates the response against `S`, returning its arguments.
    async fn call<S: Shape>(&self, body: Option<String>) -> Result<S, TransmissionError> {
        let value = self.requester.request(body).await?;
        let response = validate::<S>(value).map_err(TransmissionError::InvalidResponse)?;
        Ok(response.arguments)
    }
}
