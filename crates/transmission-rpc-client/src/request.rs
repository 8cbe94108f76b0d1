//! Request engine: one logical RPC call, from session token to decoded body.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use serde_json::Value;
use tracing::debug;

use transmission_rpc_types::TransmissionError;

use crate::{
    config::{ClientConfig, RetryConfig},
    session::{SessionManager, SessionProvider},
    transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport},
};

/// Status Transmission answers with when the session token is missing or stale.
pub const SESSION_CONFLICT: u16 = 409;

/// Executes RPC calls and returns the decoded JSON body.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait RpcRequest {
    /// Sends `body` (already serialized) and returns the decoded response.
    /// `None` sends an empty request, which Transmission answers with `"no method name"`.
    async fn request(&self, body: Option<String>) -> Result<Value, TransmissionError>;
}

/// Sends authenticated requests, renewing the session token on 409.
///
/// A 409 clears the cached token and retries after [`RetryConfig::delay`], at most
/// [`RetryConfig::max_retries`] times per call. Each call counts its own retries; the engine keeps
/// the count of the last call to update it for [`RequestEngine::retry_count`], reset by a 2xx or
/// by any other failure and left exhausted after a call ran out of retries.
pub struct RequestEngine<T: HttpTransport = ReqwestTransport, S: SessionProvider = SessionManager<T>>
{
    transport: Arc<T>,
    session: S,
    authorization: String,
    retry: RetryConfig,
    retries: AtomicU32,
}

impl RequestEngine {
    /// Creates an engine for the daemon described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, TransmissionError> {
        let endpoint = config.endpoint()?;
        debug!("Using Transmission RPC at {endpoint}");
        let transport = ReqwestTransport::new(endpoint, config.timeout)?;
        Ok(RequestEngine::with_transport(
            transport,
            config.authorization(),
            config.retry,
        ))
    }
}

impl<T: HttpTransport> RequestEngine<T> {
    /// Creates an engine sending through `transport`, with a [`SessionManager`] probing through
    /// the same transport.
    pub fn with_transport(transport: T, authorization: impl Into<String>, retry: RetryConfig) -> Self {
        let transport = Arc::new(transport);
        let authorization = authorization.into();
        let session = SessionManager::new(Arc::clone(&transport), authorization.clone());
        Self::from_parts(transport, session, authorization, retry)
    }
}

impl<T: HttpTransport, S: SessionProvider> RequestEngine<T, S> {
    /// Creates an engine from a custom transport and session provider.
    pub fn with_session(
        transport: T,
        session: S,
        authorization: impl Into<String>,
        retry: RetryConfig,
    ) -> Self {
        Self::from_parts(Arc::new(transport), session, authorization.into(), retry)
    }

    fn from_parts(transport: Arc<T>, session: S, authorization: String, retry: RetryConfig) -> Self {
        Self {
            transport,
            session,
            authorization,
            retry,
            retries: AtomicU32::new(0),
        }
    }

    /// Retries spent by the last call to record progress; `max_retries` after an exhausted call.
    pub fn retry_count(&self) -> u32 {
        self.retries.load(Ordering::SeqCst)
    }

    /// The retry policy.
    pub fn retry_config(&self) -> RetryConfig {
        self.retry
    }

    /// Retries allowed after the first attempt of a call.
    pub fn max_retries(&self) -> u32 {
        self.retry.max_retries
    }

    /// Pause between a 409 and its retry.
    pub fn delay(&self) -> Duration {
        self.retry.delay
    }

    /// The session provider.
    pub fn session(&self) -> &S {
        &self.session
    }

    async fn attempt(&self, body: Option<String>) -> Result<HttpResponse, TransmissionError> {
        let session_id = self.session.token().await?;
        self.transport
            .post(HttpRequest {
                authorization: self.authorization.clone(),
                session_id: Some(session_id),
                body,
            })
            .await
    }

    fn reset_retries(&self) {
        self.retries.store(0, Ordering::SeqCst);
    }
}

impl<T: HttpTransport, S: SessionProvider> RpcRequest for RequestEngine<T, S> {
    async fn request(&self, body: Option<String>) -> Result<Value, TransmissionError> {
        let mut retries = 0;
        loop {
            let response = match self.attempt(body.clone()).await {
                Ok(response) => response,
                Err(e) => {
                    self.reset_retries();
                    return Err(e);
                }
            };

            match response.status {
                200..=299 => {
                    self.reset_retries();
                    return serde_json::from_slice(&response.body)
                        .map_err(TransmissionError::NonJsonResponse);
                }
                SESSION_CONFLICT => {
                    if retries >= self.retry.max_retries {
                        self.retries.store(retries, Ordering::SeqCst);
                        return Err(TransmissionError::SessionRetriesExhausted { retries });
                    }
                    retries += 1;
                    debug!(
                        retry = retries,
                        max_retries = self.retry.max_retries,
                        "Session token rejected, retrying in {:?}",
                        self.retry.delay
                    );
                    self.session.reset().await;
                    self.retries.store(retries, Ordering::SeqCst);
                    tokio::time::sleep(self.retry.delay).await;
                }
                status => {
                    self.reset_retries();
                    return Err(TransmissionError::Status(status));
                }
            }
        }
    }
}

impl<T: HttpTransport, S: SessionProvider> fmt::Debug for RequestEngine<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestEngine")
            .field("authorization", &"***")
            .field("retry", &self.retry)
            .field("retries", &self.retry_count())
            .finish_non_exhaustive()
    }
}
