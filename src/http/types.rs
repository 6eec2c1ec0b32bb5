// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Request and response bodies of the light wallet REST API.
//!
//! Binary values (keys, hashes, key images) are hex encoded strings and are
//! passed through untouched. Monetary amounts are decimal strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::endpoint::{Credentials, LightWalletRequest};

// ---- /login ----

/// Checks for an account on the server or, optionally, creates one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub create_account: bool,
    pub generated_locally: bool,
}

impl LoginRequest {
    pub fn new(create_account: bool, generated_locally: bool) -> Self {
        Self {
            credentials: Credentials::default(),
            create_account,
            generated_locally,
        }
    }
}

/// A new address may receive `403 Forbidden` replies until the server
/// operator approves the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub new_address: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_locally: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_height: Option<u64>,
}

impl LightWalletRequest for LoginRequest {
    const PATH: &'static str = "/login";
    type Response = LoginResponse;

    fn credentials_mut(&mut self) -> Option<&mut Credentials> {
        Some(&mut self.credentials)
    }
}

// ---- /get_address_info ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressInfoRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
}

/// Totals and candidate spends needed to compute an account's balance.
///
/// `spent_outputs` are only candidates: the caller must check each key image
/// against its spend key to learn which were real spends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressInfoResponse {
    pub locked_funds: String,
    pub total_received: String,
    pub total_sent: String,
    pub scanned_height: u64,
    pub scanned_block_height: u64,
    pub start_height: u64,
    pub transaction_height: u64,
    pub blockchain_height: u64,
    #[serde(default)]
    pub spent_outputs: Vec<Spend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<Rates>,
}

/// A candidate spend of one of the account's outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spend {
    pub amount: String,
    pub key_image: String,
    pub tx_pub_key: String,
    pub out_index: u16,
    pub mixin: u32,
}

/// Informational XMR exchange rates. Currencies the server omits are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "UPPERCASE")]
pub struct Rates {
    pub aud: f32,
    pub brl: f32,
    pub btc: f32,
    pub cad: f32,
    pub chf: f32,
    pub cny: f32,
    pub eur: f32,
    pub gbp: f32,
    pub hkd: f32,
    pub inr: f32,
    pub jpy: f32,
    pub krw: f32,
    pub mxn: f32,
    pub nok: f32,
    pub nzd: f32,
    pub sek: f32,
    pub sgd: f32,
    #[serde(rename = "TRY")]
    pub try_: f32,
    pub usd: f32,
    pub rub: f32,
    pub zar: f32,
}

impl LightWalletRequest for AddressInfoRequest {
    const PATH: &'static str = "/get_address_info";
    type Response = AddressInfoResponse;

    fn credentials_mut(&mut self) -> Option<&mut Credentials> {
        Some(&mut self.credentials)
    }
}

// ---- /get_address_txs ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressTxsRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressTxsResponse {
    pub total_received: String,
    pub scanned_height: u64,
    pub scanned_block_height: u64,
    pub start_height: u64,
    pub blockchain_height: u64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// A transaction that received funds for, or possibly spent funds of, the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub total_received: String,
    pub total_sent: String,
    pub unlock_time: u64,
    /// Absent while the transaction is in the mempool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default)]
    pub spent_outputs: Vec<Spend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub coinbase: bool,
    pub mempool: bool,
    pub mixin: u32,
}

impl LightWalletRequest for AddressTxsRequest {
    const PATH: &'static str = "/get_address_txs";
    type Response = AddressTxsResponse;

    fn credentials_mut(&mut self) -> Option<&mut Credentials> {
        Some(&mut self.credentials)
    }
}

// ---- /get_unspent_outs ----

/// Asks for received outputs worth at least `amount`.
///
/// If `amount` exceeds everything the account has received the server replies
/// with `400 Bad Request`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnspentOutsRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub amount: String,
    pub mixin: u32,
    pub use_dust: bool,
    pub dust_threshold: String,
}

impl UnspentOutsRequest {
    pub fn new(amount: impl Into<String>, mixin: u32, use_dust: bool, dust_threshold: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::default(),
            amount: amount.into(),
            mixin,
            use_dust,
            dust_threshold: dust_threshold.into(),
        }
    }
}

/// Received outputs. Whether any of them were spent is not indicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnspentOutsResponse {
    pub per_byte_fee: String,
    pub fee_mask: String,
    pub amount: String,
    #[serde(default)]
    pub outputs: Vec<Output>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub tx_id: u64,
    pub amount: String,
    pub index: u16,
    pub global_index: String,
    pub rct: String,
    pub tx_hash: String,
    pub tx_prefix_hash: String,
    pub public_key: String,
    pub tx_pub_key: String,
    #[serde(default)]
    pub spend_key_images: Vec<String>,
    pub timestamp: String,
    pub height: u64,
}

impl LightWalletRequest for UnspentOutsRequest {
    const PATH: &'static str = "/get_unspent_outs";
    type Response = UnspentOutsResponse;

    fn credentials_mut(&mut self) -> Option<&mut Credentials> {
        Some(&mut self.credentials)
    }
}

// ---- /get_random_outs ----

/// Asks for `count` decoy outputs for each of `amounts`, to be mixed into
/// ring signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomOutsRequest {
    pub count: u32,
    pub amounts: Vec<String>,
}

impl RandomOutsRequest {
    pub fn new(count: u32, amounts: Vec<String>) -> Self {
        Self { count, amounts }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomOutsResponse {
    #[serde(default)]
    pub amount_outs: Vec<RandomOutputs>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomOutputs {
    pub amount: String,
    #[serde(default)]
    pub outputs: Vec<RandomOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomOutput {
    pub global_index: String,
    pub public_key: String,
    pub rct: String,
}

impl LightWalletRequest for RandomOutsRequest {
    const PATH: &'static str = "/get_random_outs";
    type Response = RandomOutsResponse;

    fn credentials_mut(&mut self) -> Option<&mut Credentials> {
        None
    }
}

// ---- /import_request ----

/// Requests a rescan of the account from the genesis block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
}

/// Payment fields are only present when the server charges for the rescan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_fee: Option<String>,
    pub new_request: bool,
    pub request_fulfilled: bool,
    pub status: String,
}

impl LightWalletRequest for ImportRequest {
    const PATH: &'static str = "/import_request";
    type Response = ImportResponse;

    fn credentials_mut(&mut self) -> Option<&mut Credentials> {
        Some(&mut self.credentials)
    }
}

// ---- /submit_raw_tx ----

/// A signed transaction, hex encoded, to be relayed to the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRawTxRequest {
    pub tx: String,
}

impl SubmitRawTxRequest {
    pub fn new(tx: impl Into<String>) -> Self {
        Self { tx: tx.into() }
    }

    pub fn from_bytes(raw_tx: &[u8]) -> Self {
        Self {
            tx: hex::encode(raw_tx),
        }
    }
}

/// Status reported by the server's Monero daemon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRawTxResponse {
    pub status: String,
}

impl LightWalletRequest for SubmitRawTxRequest {
    const PATH: &'static str = "/submit_raw_tx";
    type Response = SubmitRawTxResponse;

    fn credentials_mut(&mut self) -> Option<&mut Credentials> {
        None
    }
}
