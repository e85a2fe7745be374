//! Error types for the petstore client.
//!
//! # Design
//! Failures are split by the moment they can happen. `ConfigurationError` is
//! only produced while a `Configuration` is being built, before any request
//! exists. Everything that can go wrong during a call lands in `ApiError`:
//! the exchange itself (`Transport`), a non-2xx answer (`HttpStatus`, with the
//! raw status code and body), or a body that does not match the declared
//! shape (`Decode`). No variant carries a partially decoded value.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors raised while constructing a `Configuration`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The base path was the empty string.
    #[error("base path must not be empty")]
    EmptyBasePath,

    /// No base path was provided where one was required (e.g. environment).
    #[error("base path is not set (expected {0})")]
    MissingBasePath(&'static str),

    /// The base path is not a syntactically valid absolute URL.
    #[error("invalid base path {base_path:?}: {reason}")]
    InvalidBasePath { base_path: String, reason: String },

    /// The base path parsed but does not use `http` or `https`.
    #[error("unsupported scheme {0:?} in base path (expected http or https)")]
    UnsupportedScheme(String),

    /// A default header or credential header cannot be sent over HTTP.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Errors returned by API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The network exchange could not complete.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body could not be decoded into the declared type.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serializing request failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of an `HttpStatus` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
