//! HTTP transport abstraction.
//!
//! This module provides the [`HttpTransport`] trait, which abstracts the single POST exchange the
//! session manager and request engine perform, enabling mocking in tests. [`ReqwestTransport`] is
//! the production implementation.

use std::time::Duration;

use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue},
};
use url::Url;

use transmission_rpc_types::TransmissionError;

/// Header carrying the session token, on requests and on 409 responses.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// One outbound POST to the RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Value of the `Authorization` header.
    pub authorization: String,
    /// Session token to attach, if any.
    pub session_id: Option<String>,
    /// JSON body; `None` sends an empty request.
    pub body: Option<String>,
}

/// The parts of an HTTP response the client looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the session token header, if present.
    pub session_id: Option<String>,
    /// Raw body.
    pub body: Vec<u8>,
}

/// Performs POST requests against the RPC endpoint.
///
/// Transport failures (connect errors, timeouts) are reported as [`TransmissionError::Network`].
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// Sends `request` and returns the response, whatever its status.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransmissionError>;
}

/// [`HttpTransport`] backed by a [`reqwest::Client`] bound to one endpoint.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    endpoint: Url,
}

impl ReqwestTransport {
    /// Creates a transport posting to `endpoint`.
    ///
    /// `timeout` bounds each whole exchange; `None` leaves it to the HTTP client defaults.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, TransmissionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransmissionError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransmissionError> {
        let mut authorization = HeaderValue::try_from(request.authorization)
            .map_err(|e| TransmissionError::Config(format!("invalid credentials: {e}")))?;
        authorization.set_sensitive(true);

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, authorization);
        if let Some(session_id) = request.session_id {
            builder = builder.header(SESSION_ID_HEADER, session_id);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransmissionError::Network(Box::new(e)))?;
        let status = response.status().as_u16();
        let session_id = response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| TransmissionError::Network(Box::new(e)))?
            .to_vec();

        Ok(HttpResponse {
            status,
            session_id,
            body,
        })
    }
}
