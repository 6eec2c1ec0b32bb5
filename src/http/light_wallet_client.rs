//! High-level client for a Monero light wallet server.
//!
//! This module provides the [`LightWalletClient`] struct, the primary
//! interface for view-key holders to query a light wallet server over
//! HTTP/JSON, and the [`ClientConfig`] record it is built from.
//!
//! # Overview
//!
//! The client stores one account's address and private view key and sends
//! them with every account-scoped request. It offers one method per server
//! endpoint:
//!
//! - [`login`](LightWalletClient::login) - check for or create the account
//! - [`get_address_info`](LightWalletClient::get_address_info) - balance totals and candidate spends
//! - [`get_address_txs`](LightWalletClient::get_address_txs) - transaction history
//! - [`get_unspent_outs`](LightWalletClient::get_unspent_outs) - received outputs for spending
//! - [`get_random_outs`](LightWalletClient::get_random_outs) - decoys for ring signatures
//! - [`import_request`](LightWalletClient::import_request) - request a rescan from genesis
//! - [`submit_raw_tx`](LightWalletClient::submit_raw_tx) - relay a signed transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use monero_light::http::{ClientConfig, LightWalletClient, LoginRequest};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = LightWalletClient::new(ClientConfig::new("4A...address", "view_key_hex"))?;
//!
//! let login = client.login(LoginRequest::new(true, true)).await?;
//! if login.new_address {
//!     println!("Account created, scanning starts at {:?}", login.start_height);
//! }
//! let info = client.get_address_info().await?;
//! println!("Received {} piconero", info.total_received);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::log::{mask_amount, mask_string};

use super::diagnostics::{DiagnosticSink, LogSink};
use super::endpoint::{Credentials, LightWalletRequest};
use super::error::{ConfigError, LightWalletResult};
use super::http_client::HttpClient;
use super::retry::RetryPolicy;
use super::types::{
    AddressInfoRequest, AddressInfoResponse, AddressTxsRequest, AddressTxsResponse, ImportRequest, ImportResponse,
    LoginRequest, LoginResponse, RandomOutsRequest, RandomOutsResponse, SubmitRawTxRequest, SubmitRawTxResponse,
    UnspentOutsRequest, UnspentOutsResponse,
};

/// Server used when [`ClientConfig::base_url`] is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.mymonero.com";

/// Request timeout of the default transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for building a [`LightWalletClient`].
///
/// Only `address` and `view_key` are required.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use monero_light::http::ClientConfig;
///
/// let config = ClientConfig {
///     base_url: Some("http://127.0.0.1:8443".to_string()),
///     max_retries: 3,
///     retry_delay: Duration::from_secs(2),
///     ..ClientConfig::new("4A...address", "view_key_hex")
/// };
/// ```
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Server endpoint. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    /// Reusable transport handle, e.g. with custom cookies or proxies.
    pub http_client: Option<reqwest::Client>,
    /// Timeout of the default transport. Ignored when `http_client` is set.
    pub timeout: Option<Duration>,
    /// Retries after a `503 Service Unavailable` reply.
    pub max_retries: u32,
    /// Wait before every retry.
    pub retry_delay: Duration,
    /// The account's public address.
    pub address: String,
    /// The account's private view key, hex encoded.
    pub view_key: String,
    /// Receiver of dispatch diagnostics. Defaults to [`LogSink`].
    pub diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl ClientConfig {
    pub fn new(address: impl Into<String>, view_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            view_key: view_key.into(),
            ..Self::default()
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("address", &mask_string(&self.address))
            .field("view_key", &mask_string(&self.view_key))
            .finish_non_exhaustive()
    }
}

/// Client for one account on a Monero light wallet server.
///
/// The client is immutable once built. It is `Send + Sync` and can be shared
/// between tasks; each call keeps its own retry state.
///
/// The server only returns *candidates*: spends, outputs and decoys must be
/// checked by the caller with key material the server never sees.
#[derive(Debug, Clone)]
pub struct LightWalletClient {
    http_client: HttpClient,
}

impl LightWalletClient {
    /// Creates a client from `config`. Does not contact the server.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAddress`] if the address is empty, else
    /// [`ConfigError::MissingViewKey`] if the view key is empty, or
    /// [`ConfigError::HttpClient`] if the default transport cannot be built.
    pub fn new(config: ClientConfig) -> LightWalletResult<Self> {
        if config.address.is_empty() {
            return Err(ConfigError::MissingAddress.into());
        }
        if config.view_key.is_empty() {
            return Err(ConfigError::MissingViewKey.into());
        }

        let client = match config.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()
                .map_err(ConfigError::HttpClient)?,
        };
        let base_url = config.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let diagnostics = config.diagnostics.unwrap_or_else(|| Arc::new(LogSink));

        debug!(
            base_url = &*base_url,
            address = &*mask_string(&config.address),
            max_retries = config.max_retries;
            "Light wallet client created"
        );

        let http_client = HttpClient::new(
            base_url,
            Credentials::new(config.address, config.view_key),
            client,
            RetryPolicy::new(config.max_retries, config.retry_delay),
            diagnostics,
        );
        Ok(Self { http_client })
    }

    /// Returns the configured server URL (e.g. `"https://api.mymonero.com"`).
    pub fn base_url(&self) -> &str {
        self.http_client.base_url()
    }

    pub fn address(&self) -> &str {
        &self.http_client.credentials().address
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.http_client.retry_policy()
    }

    /// Sends any [`LightWalletRequest`], including endpoints this crate does
    /// not wrap. Credentials are overwritten exactly as for the built-in
    /// endpoints.
    pub async fn execute<R: LightWalletRequest>(&self, request: R) -> LightWalletResult<R::Response> {
        self.http_client.execute(request).await
    }

    /// Checks for the account on the server or, with `create_account`, creates it.
    ///
    /// Address and view key in `request` are ignored; the client's are sent.
    /// A newly created account may get `403 Forbidden` replies from other
    /// endpoints until the server operator approves it.
    pub async fn login(&self, request: LoginRequest) -> LightWalletResult<LoginResponse> {
        debug!("HTTP: Logging in to light wallet server");
        self.execute(request).await
    }

    /// Retrieves the totals and candidate spends needed to compute the balance.
    ///
    /// The balance is `total_received - total_sent`, where `total_sent` has to
    /// be recomputed from the `spent_outputs` whose key images the caller
    /// verifies with its spend key.
    pub async fn get_address_info(&self) -> LightWalletResult<AddressInfoResponse> {
        debug!("HTTP: Requesting address info");
        self.execute(AddressInfoRequest::default()).await
    }

    /// Retrieves the account's transaction history, including candidate spends.
    pub async fn get_address_txs(&self) -> LightWalletResult<AddressTxsResponse> {
        debug!("HTTP: Requesting address transactions");
        self.execute(AddressTxsRequest::default()).await
    }

    /// Retrieves received outputs that may be spent to cover `request.amount`.
    ///
    /// Address and view key in `request` are ignored; the client's are sent.
    pub async fn get_unspent_outs(&self, request: UnspentOutsRequest) -> LightWalletResult<UnspentOutsResponse> {
        debug!(
            amount = &*mask_amount(&request.amount),
            mixin = request.mixin;
            "HTTP: Requesting unspent outputs"
        );
        self.execute(request).await
    }

    /// Selects random decoy outputs for building ring signatures.
    pub async fn get_random_outs(&self, request: RandomOutsRequest) -> LightWalletResult<RandomOutsResponse> {
        debug!(
            count = request.count,
            amounts = request.amounts.len();
            "HTTP: Requesting random outputs"
        );
        self.execute(request).await
    }

    /// Asks the server to rescan the account from the genesis block.
    ///
    /// Some servers charge for this; the response then names the payment
    /// address and fee.
    pub async fn import_request(&self) -> LightWalletResult<ImportResponse> {
        info!(target: "audit", "HTTP: Requesting account import");
        self.execute(ImportRequest::default()).await
    }

    /// Relays a signed, hex encoded transaction to the Monero network.
    pub async fn submit_raw_tx(&self, request: SubmitRawTxRequest) -> LightWalletResult<SubmitRawTxResponse> {
        info!(target: "audit", "HTTP: Submitting raw transaction");
        let response = self.execute(request).await?;
        info!(
            target: "audit",
            status = &*response.status;
            "HTTP: Raw transaction submitted"
        );
        Ok(response)
    }
}
