//! # Transmission RPC Types
//!
//! This crate defines the error type, the torrent field catalog and the response shapes shared by
//! the Transmission RPC client crates.

use thiserror::Error;

mod fields;
mod number;
mod session;
mod shape;
mod torrent;

pub use fields::{TorrentField, TorrentStatus, UnknownTorrentField};
pub use session::{Session, Units};
pub use shape::{
    Acknowledged, PingArguments, RESULT_NO_METHOD_NAME, RESULT_SUCCESS, Response, Shape,
    ValidationError, validate,
};
pub use torrent::{
    FileStat, PeersFrom, Torrent, TorrentAdd, TorrentAdded, TorrentFile, TorrentList, Tracker,
};

/// Boxed error produced by an HTTP transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for Transmission RPC operations.
#[derive(Error, Debug)]
pub enum TransmissionError {
    /// Network-related errors (connection failures, timeouts, etc.), as reported by the transport.
    #[error("network error: {0}")]
    Network(#[source] BoxError),

    /// The session token request did not return an `X-Transmission-Session-Id` header.
    #[error("missing session token: unable to obtain a session ID from the Transmission RPC endpoint")]
    MissingSessionToken {
        /// Raw body of the token response.
        body: String,
    },

    /// The endpoint kept answering 409 after the configured number of retries.
    #[error(
        "Transmission RPC endpoint did not return a session ID, max retries exceeded ({retries} retries)"
    )]
    SessionRetriesExhausted {
        /// Number of retries that were attempted.
        retries: u32,
    },

    /// The endpoint answered with a non-success status other than 409.
    #[error("Transmission RPC endpoint returned status code {0}")]
    Status(u16),

    /// The endpoint answered 2xx but the body was not JSON.
    #[error("Transmission RPC endpoint returned a non JSON response")]
    NonJsonResponse(#[source] serde_json::Error),

    /// The decoded body did not match the expected response shape.
    #[error("Transmission RPC endpoint returned an invalid response")]
    InvalidResponse(#[source] ValidationError),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A failed RPC method, with the underlying error as source.
    #[error("{context}")]
    Rpc {
        /// What the method was trying to do.
        context: String,
        /// Underlying failure.
        #[source]
        source: Box<TransmissionError>,
    },
}

impl TransmissionError {
    /// Wraps `self` with a method-specific message.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Rpc {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping any [`TransmissionError::Rpc`] wrappers.
    pub fn root(&self) -> &Self {
        match self {
            Self::Rpc { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn context_keeps_source() {
        let err = TransmissionError::Status(500).context("unable to ping");

        assert_eq!(err.to_string(), "unable to ping");
        let source = err.source().expect("rpc error has a source");
        assert_eq!(
            source.to_string(),
            "Transmission RPC endpoint returned status code 500"
        );
        assert!(matches!(err.root(), TransmissionError::Status(500)));
    }

    #[test]
    fn retries_exhausted_message() {
        let err = TransmissionError::SessionRetriesExhausted { retries: 2 };
        assert!(err.to_string().contains("max retries exceeded"));
    }

    #[test]
    fn missing_token_message() {
        let err = TransmissionError::MissingSessionToken {
            body: "<h1>409: Conflict</h1>".into(),
        };
        assert!(err.to_string().contains("missing session token"));
    }
}
