// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::log::mask_string;

/// Account credentials sent with every account-scoped request.
///
/// Serialized as the `address` and `view_key` fields of the enclosing request
/// body. The view key is the hex encoded private view key.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub address: String,
    pub view_key: String,
}

impl Credentials {
    pub fn new(address: impl Into<String>, view_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            view_key: view_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("address", &mask_string(&self.address))
            .field("view_key", &mask_string(&self.view_key))
            .finish()
    }
}

/// A request body for one light wallet server endpoint.
///
/// Every request type names the path it is posted to and the response it
/// decodes into. `credentials_mut` has no default implementation so that each
/// endpoint states explicitly whether it carries account credentials; the
/// dispatcher overwrites whatever it returns with the client's own
/// credentials before sending.
pub trait LightWalletRequest: Serialize {
    /// Path appended to the server's base URL, e.g. `/get_address_info`.
    const PATH: &'static str;

    type Response: DeserializeOwned;

    fn credentials_mut(&mut self) -> Option<&mut Credentials>;
}
