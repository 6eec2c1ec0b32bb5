// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::{ApplyArgs, ConnectionArgs};
use crate::http::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Front-end configuration, read from the config file and environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LightWalletConfig {
    pub base_url: String,
    pub address: String,
    pub view_key: String,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Default for LightWalletConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            address: String::new(),
            view_key: String::new(),
            max_retries: 3,
            retry_delay_ms: 1000,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl LightWalletConfig {
    pub fn into_client_config(self) -> ClientConfig {
        ClientConfig {
            base_url: Some(self.base_url),
            timeout: Some(Duration::from_secs(self.timeout_secs)),
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            ..ClientConfig::new(self.address, self.view_key)
        }
    }
}

impl ApplyArgs for LightWalletConfig {
    fn apply_connection(&mut self, args: &ConnectionArgs) {
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(address) = &args.address {
            self.address = address.clone();
        }
        if let Some(view_key) = &args.view_key {
            self.view_key = view_key.clone();
        }
        if let Some(max_retries) = args.max_retries {
            self.max_retries = max_retries;
        }
        if let Some(retry_delay_ms) = args.retry_delay_ms {
            self.retry_delay_ms = retry_delay_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_override_file_values() {
        let mut config = LightWalletConfig {
            address: "from_file".into(),
            view_key: "file_view_key".into(),
            ..LightWalletConfig::default()
        };
        config.apply_connection(&ConnectionArgs {
            base_url: Some("http://127.0.0.1:8443".into()),
            address: Some("from_cli".into()),
            max_retries: Some(0),
            ..ConnectionArgs::default()
        });

        assert_eq!(config.base_url, "http://127.0.0.1:8443");
        assert_eq!(config.address, "from_cli");
        assert_eq!(config.view_key, "file_view_key");
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.retry_delay_ms, 1000);
    }

    #[test]
    fn test_into_client_config() {
        let config = LightWalletConfig {
            address: "xmr_address".into(),
            view_key: "xmr_view_key".into(),
            retry_delay_ms: 250,
            ..LightWalletConfig::default()
        }
        .into_client_config();

        assert_eq!(config.base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert_eq!(config.retry_delay, Duration::from_millis(250));
        assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
        assert_eq!(config.address, "xmr_address");
        assert_eq!(config.view_key, "xmr_view_key");
    }
}
