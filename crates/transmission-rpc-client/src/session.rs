//! Session token lifecycle.
//!
//! Transmission rejects requests that lack a valid `X-Transmission-Session-Id` header with a 409,
//! and hands out the token to use in that same response. [`SessionManager`] obtains the token
//! with an empty request and caches it until told to drop it.

use std::{fmt, sync::Arc};

use tokio::sync::Mutex;
use tracing::debug;

use transmission_rpc_types::TransmissionError;

use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

/// Source of session tokens for the request engine.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait SessionProvider {
    /// Returns the current token, fetching one if none is cached.
    async fn token(&self) -> Result<String, TransmissionError>;

    /// Drops the cached token so the next [`SessionProvider::token`] call fetches a fresh one.
    async fn reset(&self);
}

/// Caches the session token obtained from the RPC endpoint.
///
/// The cache is behind an async mutex held across the token request, so concurrent callers on a cold
/// cache share a single token request.
pub struct SessionManager<T: HttpTransport = ReqwestTransport> {
    transport: Arc<T>,
    authorization: String,
    token: Mutex<Option<String>>,
}

impl<T: HttpTransport> SessionManager<T> {
    /// Creates a session manager probing through `transport` with the given `Authorization`
    /// header value.
    pub fn new(transport: Arc<T>, authorization: impl Into<String>) -> Self {
        Self {
            transport,
            authorization: authorization.into(),
            token: Mutex::new(None),
        }
    }
}

impl<T: HttpTransport> SessionProvider for SessionManager<T> {
    async fn token(&self) -> Result<String, TransmissionError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        debug!("Requesting a session token");
        let response = self
            .transport
            .post(HttpRequest {
                authorization: self.authorization.clone(),
                session_id: None,
                body: None,
            })
            .await?;

        let Some(token) = response.session_id.filter(|token| !token.is_empty()) else {
            return Err(TransmissionError::MissingSessionToken {
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        };

        debug!(status = response.status, "Obtained session token");
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn reset(&self) {
        if self.token.lock().await.take().is_some() {
            debug!("Session token cleared");
        }
    }
}

impl<T: HttpTransport> fmt::Debug for SessionManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.token.try_lock().map(|token| token.is_some()).ok();
        f.debug_struct("SessionManager")
            .field("authorization", &"***")
            .field("token_cached", &cached)
            .finish_non_exhaustive()
    }
}
