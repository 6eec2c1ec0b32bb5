// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Blocking light wallet client.
//!
//! Every call blocks the calling thread until the response is decoded or
//! the call fails, including any retry waits. Do not use it from inside an
//! async runtime; use [`crate::http::LightWalletClient`] there.
//!
//! # Example
//!
//! ```rust,no_run
//! use monero_light::blocking::LightWalletClient;
//! use monero_light::http::ClientConfig;
//!
//! # fn example() -> Result<(), anyhow::Error> {
//! let client = LightWalletClient::new(ClientConfig::new("4A...address", "view_key_hex"))?;
//! let txs = client.get_address_txs()?;
//! println!("{} transactions", txs.transactions.len());
//! # Ok(())
//! # }
//! ```

use tokio::runtime::{Builder, Runtime};

use crate::http::{
    self, AddressInfoResponse, AddressTxsResponse, ClientConfig, ConfigError, ImportResponse, LightWalletRequest,
    LightWalletResult, LoginRequest, LoginResponse, RandomOutsRequest, RandomOutsResponse, SubmitRawTxRequest,
    SubmitRawTxResponse, UnspentOutsRequest, UnspentOutsResponse,
};

/// Synchronous counterpart of [`http::LightWalletClient`] with the same operations.
#[derive(Debug)]
pub struct LightWalletClient {
    inner: http::LightWalletClient,
    runtime: Runtime,
}

impl LightWalletClient {
    pub fn new(config: ClientConfig) -> LightWalletResult<Self> {
        let inner = http::LightWalletClient::new(config)?;
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ConfigError::Runtime)?;
        Ok(Self { inner, runtime })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    pub fn execute<R: LightWalletRequest>(&self, request: R) -> LightWalletResult<R::Response> {
        self.runtime.block_on(self.inner.execute(request))
    }

    pub fn login(&self, request: LoginRequest) -> LightWalletResult<LoginResponse> {
        self.runtime.block_on(self.inner.login(request))
    }

    pub fn get_address_info(&self) -> LightWalletResult<AddressInfoResponse> {
        self.runtime.block_on(self.inner.get_address_info())
    }

    pub fn get_address_txs(&self) -> LightWalletResult<AddressTxsResponse> {
        self.runtime.block_on(self.inner.get_address_txs())
    }

    pub fn get_unspent_outs(&self, request: UnspentOutsRequest) -> LightWalletResult<UnspentOutsResponse> {
        self.runtime.block_on(self.inner.get_unspent_outs(request))
    }

    pub fn get_random_outs(&self, request: RandomOutsRequest) -> LightWalletResult<RandomOutsResponse> {
        self.runtime.block_on(self.inner.get_random_outs(request))
    }

    pub fn import_request(&self) -> LightWalletResult<ImportResponse> {
        self.runtime.block_on(self.inner.import_request())
    }

    pub fn submit_raw_tx(&self, request: SubmitRawTxRequest) -> LightWalletResult<SubmitRawTxResponse> {
        self.runtime.block_on(self.inner.submit_raw_tx(request))
    }
}
