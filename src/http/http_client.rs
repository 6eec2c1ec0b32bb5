// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::diagnostics::{DiagnosticSink, DispatchEvent};
use super::endpoint::{Credentials, LightWalletRequest};
use super::error::{DecodeError, LightWalletError, LightWalletResult};
use super::retry::{RetryPolicy, RetryState};

/// Sends requests to a light wallet server: every endpoint goes through
/// [`HttpClient::execute`].
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    base_url: String,
    credentials: Credentials,
    client: reqwest::Client,
    retry_policy: RetryPolicy,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl HttpClient {
    pub fn new(
        base_url: String,
        credentials: Credentials,
        client: reqwest::Client,
        retry_policy: RetryPolicy,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            base_url,
            credentials,
            client,
            retry_policy,
            diagnostics,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Posts `request` to its endpoint and decodes the reply.
    ///
    /// Credentials carried by the request are replaced with the client's own
    /// before anything else happens.
    pub async fn execute<R: LightWalletRequest>(&self, mut request: R) -> LightWalletResult<R::Response> {
        if let Some(credentials) = request.credentials_mut() {
            credentials.clone_from(&self.credentials);
        }

        self.post_json(R::PATH, &request).await
    }

    /// Encode, join, send with 503 retries, then decode.
    pub(crate) async fn post_json<T: Serialize + ?Sized, U: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> LightWalletResult<U> {
        let result = self.try_post_json(path, body).await;
        if let Err(error) = &result {
            self.diagnostics.report(&DispatchEvent::Failed { path, error });
        }
        result
    }

    async fn try_post_json<T: Serialize + ?Sized, U: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> LightWalletResult<U> {
        let body = serde_json::to_vec(body).map_err(LightWalletError::Encode)?;
        let url = join_path(&self.base_url, path)?;

        let mut state = RetryState::new();
        let response = loop {
            let attempt = state.begin_attempt();
            self.diagnostics.report(&DispatchEvent::Sending { url: &url, attempt });

            let resp = self
                .client
                .post(url.clone())
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone())
                .send()
                .await
                .map_err(LightWalletError::Transport)?;

            match resp.status() {
                StatusCode::OK => break resp,
                StatusCode::SERVICE_UNAVAILABLE => {
                    if !self.retry_policy.allows_retry(&state) {
                        return Err(LightWalletError::ServiceUnavailable {
                            attempts: state.attempts_made(),
                        });
                    }
                    self.diagnostics.report(&DispatchEvent::RetryScheduled {
                        url: &url,
                        attempt,
                        delay: self.retry_policy.delay,
                    });
                    tokio::time::sleep(self.retry_policy.delay).await;
                },
                status => {
                    let body = resp
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read response body".into());
                    return Err(LightWalletError::Status { status, body });
                },
            }
        };

        let bytes = read_body(response).await?;
        let decoded = serde_json::from_slice(&bytes).map_err(|source| LightWalletError::Decode {
            source: source.into(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })?;

        self.diagnostics.report(&DispatchEvent::Completed {
            url: &url,
            attempts: state.attempts_made(),
        });
        Ok(decoded)
    }
}

/// Reads the body of a `200 OK` reply. A response was obtained, so a
/// failure here is a decode error, reported with the bytes read so far.
async fn read_body(mut response: reqwest::Response) -> LightWalletResult<Vec<u8>> {
    let mut bytes = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => bytes.extend_from_slice(&chunk),
            Ok(None) => return Ok(bytes),
            Err(error) => {
                return Err(LightWalletError::Decode {
                    source: DecodeError::Body(error),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                });
            },
        }
    }
}

/// Appends `path` to the path of `base_url`, keeping any prefix the base
/// already has (`https://host/api` + `/login` is `https://host/api/login`).
pub(crate) fn join_path(base_url: &str, path: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
        segments.pop_if_empty();
        segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use serde::Serializer;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::error::ErrorKind;
    use crate::http::types::{AddressInfoRequest, AddressInfoResponse, LoginRequest, RandomOutsRequest};

    #[derive(Debug, Default)]
    struct RecordingSink {
        events: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.events().iter().filter(|e| e.starts_with(prefix)).count()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn report(&self, event: &DispatchEvent<'_>) {
            let line = match event {
                DispatchEvent::Sending { attempt, .. } => format!("sending {attempt}"),
                DispatchEvent::RetryScheduled { attempt, .. } => format!("retry {attempt}"),
                DispatchEvent::Completed { attempts, .. } => format!("completed {attempts}"),
                DispatchEvent::Failed { error, .. } => format!("failed {}", error.kind()),
            };
            self.events.lock().unwrap().push(line);
        }
    }

    fn client_for(base_url: &str, max_retries: u32, sink: Arc<RecordingSink>) -> HttpClient {
        HttpClient::new(
            base_url.to_string(),
            Credentials::new("xmr_address", "xmr_view_key"),
            reqwest::Client::new(),
            RetryPolicy::new(max_retries, Duration::ZERO),
            sink,
        )
    }

    fn address_info_json() -> serde_json::Value {
        json!({
            "locked_funds": "1",
            "total_received": "2",
            "total_sent": "3",
            "scanned_height": 4,
            "scanned_block_height": 5,
            "start_height": 6,
            "transaction_height": 7,
            "blockchain_height": 8,
            "spent_outputs": [
                { "amount": "1", "key_image": "", "tx_pub_key": "", "out_index": 2, "mixin": 3 }
            ],
            "rates": { "AUD": 4.1, "EUR": 4.2, "GBP": 4.3, "USD": 4.4, "RUB": 4.5 },
        })
    }

    #[tokio::test]
    async fn test_retries_once_then_decodes() {
        let mock_server = MockServer::start().await;
        let expected_body = json!({ "address": "xmr_address", "view_key": "xmr_view_key" });

        Mock::given(method("POST"))
            .and(path("/get_address_info"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/get_address_info"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(address_info_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sink = Arc::new(RecordingSink::default());
        let client = client_for(&mock_server.uri(), 1, sink.clone());

        let response = client.execute(AddressInfoRequest::default()).await.unwrap();

        let expected: AddressInfoResponse = serde_json::from_value(address_info_json()).unwrap();
        assert_eq!(response, expected);
        assert_eq!(response.rates.as_ref().map(|r| r.usd), Some(4.4));

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, requests[1].body);
        assert_eq!(
            String::from_utf8_lossy(&requests[0].body),
            r#"{"address":"xmr_address","view_key":"xmr_view_key"}"#
        );
        assert_eq!(sink.events(), vec!["sending 1", "retry 1", "sending 2", "completed 2"]);
    }

    #[tokio::test]
    async fn test_caller_supplied_credentials_are_overwritten() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({
                "address": "xmr_address",
                "view_key": "xmr_view_key",
                "create_account": false,
                "generated_locally": true,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "new_address": true,
                "generated_locally": false,
                "start_height": 3223243,
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sink = Arc::new(RecordingSink::default());
        let client = client_for(&mock_server.uri(), 0, sink);

        let mut request = LoginRequest::new(false, true);
        request.credentials = Credentials::new("someone_else", "their_view_key");

        let response = client.execute(request).await.unwrap();
        assert!(response.new_address);
        assert_eq!(response.start_height, Some(3223243));
    }

    #[tokio::test]
    async fn test_retries_until_success_within_budget() {
        for failures in 0..4u32 {
            let mock_server = MockServer::start().await;
            if failures > 0 {
                Mock::given(method("POST"))
                    .respond_with(ResponseTemplate::new(503))
                    .up_to_n_times(u64::from(failures))
                    .mount(&mock_server)
                    .await;
            }
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "amount_outs": [] })))
                .mount(&mock_server)
                .await;

            let sink = Arc::new(RecordingSink::default());
            let delay = Duration::from_millis(15);
            let client = HttpClient::new(
                mock_server.uri(),
                Credentials::new("xmr_address", "xmr_view_key"),
                reqwest::Client::new(),
                RetryPolicy::new(4, delay),
                sink.clone(),
            );

            let start = Instant::now();
            let response = client.execute(RandomOutsRequest::new(16, vec![])).await.unwrap();

            assert!(start.elapsed() >= delay * failures);
            assert!(response.amount_outs.is_empty());
            assert_eq!(sink.count("retry"), failures as usize);
            assert_eq!(
                mock_server.received_requests().await.unwrap().len(),
                failures as usize + 1
            );
        }
    }

    #[tokio::test]
    async fn test_service_unavailable_after_budget_exhausted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&mock_server)
            .await;

        let sink = Arc::new(RecordingSink::default());
        let client = client_for(&mock_server.uri(), 2, sink.clone());

        let err = client.execute(AddressInfoRequest::default()).await.unwrap_err();

        assert!(matches!(err, LightWalletError::ServiceUnavailable { attempts: 3 }));
        assert_eq!(sink.count("retry"), 2);
        assert_eq!(sink.count("failed Service Unavailable"), 1);
    }

    #[tokio::test]
    async fn test_no_retries_by_default() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sink = Arc::new(RecordingSink::default());
        let client = client_for(&mock_server.uri(), 0, sink.clone());

        let err = client.execute(AddressInfoRequest::default()).await.unwrap_err();

        assert!(matches!(err, LightWalletError::ServiceUnavailable { attempts: 1 }));
        assert_eq!(sink.count("retry"), 0);
    }

    #[tokio::test]
    async fn test_other_statuses_are_terminal() {
        for code in [400u16, 403, 500] {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(code).set_body_string("nope"))
                .expect(1)
                .mount(&mock_server)
                .await;

            let sink = Arc::new(RecordingSink::default());
            let client = client_for(&mock_server.uri(), 3, sink.clone());

            let err = client.execute(AddressInfoRequest::default()).await.unwrap_err();

            match err {
                LightWalletError::Status { status, body } => {
                    assert_eq!(status.as_u16(), code);
                    assert_eq!(body, "nope");
                },
                other => panic!("expected status error, got {other:?}"),
            }
            assert_eq!(sink.count("retry"), 0);
        }
    }

    #[tokio::test]
    async fn test_success_statuses_other_than_200_are_terminal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202).set_body_json(address_info_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), 1, Arc::new(RecordingSink::default()));
        let err = client.execute(AddressInfoRequest::default()).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::ACCEPTED));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"locked_funds": "1", "#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), 1, Arc::new(RecordingSink::default()));
        let err = client.execute(AddressInfoRequest::default()).await.unwrap_err();

        match err {
            LightWalletError::Decode { body, .. } => assert_eq!(body, r#"{"locked_funds": "1", "#),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "locked_funds": "1" })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), 0, Arc::new(RecordingSink::default()));
        let err = client.execute(AddressInfoRequest::default()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_truncated_body_is_decode_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let partial = r#"{"locked_funds":"1","#;

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !(request.windows(4).any(|w| w == b"\r\n\r\n") && request.ends_with(b"}")) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let reply = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\n\r\n{partial}"
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        let sink = Arc::new(RecordingSink::default());
        let client = client_for(&format!("http://127.0.0.1:{port}"), 3, sink.clone());

        let err = client.execute(AddressInfoRequest::default()).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.kind(), ErrorKind::Decode);
        match err {
            LightWalletError::Decode { source, body } => {
                assert!(matches!(source, DecodeError::Body(_)));
                assert!(partial.starts_with(&body));
            },
            other => panic!("expected decode error, got {other:?}"),
        }
        assert_eq!(sink.events(), vec!["sending 1", "failed Decode"]);
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("corrupt field"))
        }
    }

    #[tokio::test]
    async fn test_encode_error_makes_no_request() {
        let mock_server = MockServer::start().await;

        let sink = Arc::new(RecordingSink::default());
        let client = client_for(&mock_server.uri(), 3, sink.clone());

        let err = client
            .post_json::<_, AddressInfoResponse>("/get_address_info", &Unencodable)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Encode);
        assert_eq!(sink.events(), vec!["failed Encode"]);
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_base_url_makes_no_request() {
        for base_url in ["not a url", "mailto:someone@example.com"] {
            let sink = Arc::new(RecordingSink::default());
            let client = client_for(base_url, 3, sink.clone());

            let err = client.execute(AddressInfoRequest::default()).await.unwrap_err();

            assert_eq!(err.kind(), ErrorKind::Url);
            assert_eq!(sink.events(), vec!["failed URL"]);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let sink = Arc::new(RecordingSink::default());
        let client = client_for(&format!("http://127.0.0.1:{port}"), 3, sink.clone());

        let err = client.execute(AddressInfoRequest::default()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(sink.events(), vec!["sending 1", "failed Transport"]);
    }

    #[test]
    fn test_join_path_keeps_base_prefix() {
        assert_eq!(
            join_path("https://api.mymonero.com", "/login").unwrap().as_str(),
            "https://api.mymonero.com/login"
        );
        assert_eq!(
            join_path("https://api.mymonero.com/", "/login").unwrap().as_str(),
            "https://api.mymonero.com/login"
        );
        assert_eq!(
            join_path("http://127.0.0.1:8443/lws/", "/get_address_txs").unwrap().as_str(),
            "http://127.0.0.1:8443/lws/get_address_txs"
        );
    }
}
