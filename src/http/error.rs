// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for light wallet client operations.
//!
//! This module defines the [`LightWalletError`] enum which encompasses every
//! failure mode of a call against a light wallet server, from building the
//! client through decoding the server's reply.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while constructing or using a light wallet client.
///
/// Every variant maps to exactly one [`ErrorKind`]. Only a `503 Service
/// Unavailable` reply is ever retried, and only inside the client; every
/// variant returned to the caller is final for that call.
///
/// # Example
///
/// ```rust,no_run
/// use monero_light::http::{ErrorKind, LightWalletError};
///
/// fn handle_error(err: LightWalletError) {
///     match err.kind() {
///         ErrorKind::ServiceUnavailable => eprintln!("Server is overloaded, try later"),
///         ErrorKind::Status => eprintln!("Server rejected the request: {err}"),
///         _ => eprintln!("Other error: {err}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum LightWalletError {
    /// The client configuration was rejected at construction time.
    #[error("Invalid client configuration: {0}")]
    Config(#[from] ConfigError),

    /// The request value could not be serialized to JSON.
    ///
    /// Returned before any network attempt is made.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured base URL and the endpoint path could not be joined.
    ///
    /// Returned before any network attempt is made.
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The request failed before any HTTP response was obtained.
    ///
    /// This typically indicates connectivity issues such as:
    /// - Connection refused (server not running)
    /// - Connection timeout
    /// - DNS resolution failure
    /// - TLS/SSL handshake errors
    ///
    /// Transport failures are never retried by the client.
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server kept answering `503 Service Unavailable` until the retry
    /// budget was spent.
    #[error("Server responded with 503 Service Unavailable on all {attempts} attempts")]
    ServiceUnavailable {
        /// Total number of requests sent, including the first one.
        attempts: u32,
    },

    /// The server returned a status other than `200 OK` or `503`.
    ///
    /// Common scenarios include:
    /// - `400 Bad Request`: requested amount exceeds the account's received outputs
    /// - `403 Forbidden`: a new account is awaiting manual approval
    /// - `500 Internal Server Error`: server-side processing error
    #[error("Server error {status}: {body}")]
    Status {
        /// The HTTP status code returned by the server.
        status: reqwest::StatusCode,
        /// The response body, which may contain error details.
        body: String,
    },

    /// A `200 OK` response body could not be read in full or parsed into
    /// the expected shape.
    #[error("Failed to decode response: {source}")]
    Decode {
        #[source]
        source: DecodeError,
        /// The raw response body, or the part received before reading
        /// failed, kept for diagnostics.
        body: String,
    },
}

impl LightWalletError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LightWalletError::Config(_) => ErrorKind::Config,
            LightWalletError::Encode(_) => ErrorKind::Encode,
            LightWalletError::Url(_) => ErrorKind::Url,
            LightWalletError::Transport(_) => ErrorKind::Transport,
            LightWalletError::ServiceUnavailable { .. } => ErrorKind::ServiceUnavailable,
            LightWalletError::Status { .. } => ErrorKind::Status,
            LightWalletError::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Returns the HTTP status attached to the error, if the server answered.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            LightWalletError::Status { status, .. } => Some(*status),
            LightWalletError::ServiceUnavailable { .. } => Some(reqwest::StatusCode::SERVICE_UNAVAILABLE),
            _ => None,
        }
    }
}

/// Why a `200 OK` reply could not be turned into a response value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The connection failed while the body was being read.
    #[error("response body could not be read: {0}")]
    Body(#[source] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Reasons a [`ClientConfig`](super::ClientConfig) is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no address was provided")]
    MissingAddress,

    #[error("no view key was provided")]
    MissingViewKey,

    /// The default transport could not be built (e.g. TLS backend failure).
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The blocking client could not start its runtime.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Categories of [`LightWalletError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Encode,
    Url,
    Transport,
    ServiceUnavailable,
    Status,
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Config => write!(f, "Config"),
            ErrorKind::Encode => write!(f, "Encode"),
            ErrorKind::Url => write!(f, "URL"),
            ErrorKind::Transport => write!(f, "Transport"),
            ErrorKind::ServiceUnavailable => write!(f, "Service Unavailable"),
            ErrorKind::Status => write!(f, "Status"),
            ErrorKind::Decode => write!(f, "Decode"),
        }
    }
}

pub type LightWalletResult<T> = Result<T, LightWalletError>;
