//! HTTP client module for Monero light wallet servers.
//!
//! This module provides a complete client for the light wallet REST API: a
//! view-key holder can query balances, transaction history, unspent outputs
//! and decoys, request a rescan, and relay signed transactions without
//! running a full node.
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`LightWalletClient`] - High-level client with one method per endpoint
//! - `HttpClient` - The dispatcher every endpoint goes through: it injects the
//!   account credentials, encodes the request, posts it, retries on `503`
//!   and decodes the reply
//! - [`LightWalletRequest`] - Ties a request body to its path and response type
//! - [`LightWalletError`] - Error types for every failure mode
//! - [`DiagnosticSink`] - Receiver of dispatch events, [`LogSink`] by default
//!
//! # Retries
//!
//! A `503 Service Unavailable` reply is retried up to
//! [`ClientConfig::max_retries`] times with a fixed
//! [`ClientConfig::retry_delay`] in between. Nothing else is retried:
//! transport failures and every other non-`200` status are returned at once.
//! There is no overall deadline beyond the transport's own timeout.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use monero_light::http::{ClientConfig, LightWalletClient, UnspentOutsRequest};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = LightWalletClient::new(ClientConfig {
//!     max_retries: 3,
//!     retry_delay: Duration::from_secs(1),
//!     ..ClientConfig::new("4A...address", "view_key_hex")
//! })?;
//!
//! let unspent = client
//!     .get_unspent_outs(UnspentOutsRequest::new("1000000000000", 15, false, "2000000000"))
//!     .await?;
//! for output in unspent.outputs {
//!     println!("{} at height {}", output.amount, output.height);
//! }
//! # Ok(())
//! # }
//! ```

mod diagnostics;
mod endpoint;
mod error;
mod http_client;
mod light_wallet_client;
mod retry;
mod types;

pub use diagnostics::{DiagnosticSink, DispatchEvent, LogSink};
pub use endpoint::{Credentials, LightWalletRequest};
pub use error::{ConfigError, DecodeError, ErrorKind, LightWalletError, LightWalletResult};
pub use light_wallet_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, LightWalletClient};
pub use retry::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, RetryPolicy, RetryState};
pub use types::{
    AddressInfoRequest, AddressInfoResponse, AddressTxsRequest, AddressTxsResponse, ImportRequest, ImportResponse,
    LoginRequest, LoginResponse, Output, RandomOutput, RandomOutputs, RandomOutsRequest, RandomOutsResponse, Rates,
    Spend, SubmitRawTxRequest, SubmitRawTxResponse, Transaction, UnspentOutsRequest, UnspentOutsResponse,
};
