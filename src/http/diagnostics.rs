// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Pluggable diagnostics for the request dispatcher.
//!
//! The dispatcher never writes to stderr or a logger directly. It reports
//! [`DispatchEvent`]s to a [`DiagnosticSink`]; the default [`LogSink`]
//! forwards them to the `log` facade.

use std::fmt::Debug;
use std::time::Duration;

use log::{debug, warn};
use url::Url;

use super::error::LightWalletError;

/// Something the dispatcher did or observed during a call.
#[derive(Debug)]
pub enum DispatchEvent<'a> {
    /// A request is about to be sent. `attempt` starts at 1.
    Sending { url: &'a Url, attempt: u32 },
    /// The server answered 503 and the request will be resent after `delay`.
    RetryScheduled { url: &'a Url, attempt: u32, delay: Duration },
    /// A response was decoded successfully.
    Completed { url: &'a Url, attempts: u32 },
    /// The call is about to return `error`.
    Failed { path: &'a str, error: &'a LightWalletError },
}

/// Receiver for [`DispatchEvent`]s.
pub trait DiagnosticSink: Debug + Send + Sync {
    fn report(&self, event: &DispatchEvent<'_>);
}

/// Forwards dispatch events to the `log` facade.
///
/// Request bodies are never logged since they carry the account's view key.
/// Failures are logged at debug level only; the error itself goes back to
/// the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, event: &DispatchEvent<'_>) {
        match event {
            DispatchEvent::Sending { url, attempt } => {
                debug!(
                    url:% = url,
                    attempt = *attempt;
                    "HTTP: Sending request to light wallet server"
                );
            },
            DispatchEvent::RetryScheduled { url, attempt, delay } => {
                warn!(
                    url:% = url,
                    attempt = *attempt,
                    delay_ms = delay.as_millis() as u64;
                    "HTTP: Server unavailable, retrying"
                );
            },
            DispatchEvent::Completed { url, attempts } => {
                debug!(
                    url:% = url,
                    attempts = *attempts;
                    "HTTP: Request successful"
                );
            },
            DispatchEvent::Failed { path, error } => {
                debug!(
                    path = *path,
                    kind:% = error.kind(),
                    error:% = error;
                    "HTTP: Request failed"
                );
            },
        }
    }
}
