//! Blocking sender built on `reqwest::blocking`.
//!
//! [`Sender::send`] blocks the calling thread for one request/response round trip,
//! bounded by the configured timeout. Do not use it from inside an async runtime.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::http::{HttpRequest, TransportFailure, raw_response};
use super::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, SenderBuilder, VertexSmsError};
use crate::domain::{ApiToken, Message, RawResponse};

pub(crate) trait BlockingHttpTransport: Send + Sync {
    fn post_json(&self, request: HttpRequest) -> Result<RawResponse, TransportFailure>;
}

#[derive(Debug, Clone)]
struct ReqwestBlockingTransport {
    client: reqwest::blocking::Client,
}

impl BlockingHttpTransport for ReqwestBlockingTransport {
    fn post_json(&self, request: HttpRequest) -> Result<RawResponse, TransportFailure> {
        let mut builder = self.client.post(&request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.body(request.body).send()?;
        let version = response.version();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?;

        Ok(raw_response(version, status, &headers, &body))
    }
}

#[derive(Clone)]
/// Blocking counterpart of [`crate::Sender`], with the same setters.
pub struct Sender {
    token: ApiToken,
    message: Message,
    endpoint: String,
    timeout: Duration,
    http: Arc<dyn BlockingHttpTransport>,
}

impl fmt::Debug for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("token", &self.token)
            .field("message", &self.message)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Sender {
    /// Create a blocking sender using the default endpoint and timeout.
    pub fn new(token: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .expect("default HTTP client configuration is static; only TLS init can fail");

        Self::from_parts(
            ApiToken::new(token),
            DEFAULT_ENDPOINT.to_owned(),
            DEFAULT_TIMEOUT,
            client,
        )
    }

    /// Start building a sender with custom settings; finish with
    /// [`SenderBuilder::build_blocking`].
    pub fn builder(token: impl Into<String>) -> SenderBuilder {
        SenderBuilder::new(token)
    }

    pub(crate) fn from_parts(
        token: ApiToken,
        endpoint: String,
        timeout: Duration,
        client: reqwest::blocking::Client,
    ) -> Self {
        Self {
            token,
            message: Message::new(),
            endpoint,
            timeout,
            http: Arc::new(ReqwestBlockingTransport { client }),
        }
    }

    super::message_setters!();

    /// Post the message to VertexSMS, blocking until the response arrives.
    ///
    /// Same contract as [`crate::Sender::send`].
    pub fn send(&self) -> Result<RawResponse, VertexSmsError> {
        let request =
            HttpRequest::send_sms(&self.token, &self.message, &self.endpoint, self.timeout)?;
        let response = self.http.post_json(request).map_err(|err| {
            tracing::warn!(
                endpoint = %self.endpoint,
                kind = %err.kind(),
                error = %err,
                "SMS request failed"
            );
            VertexSmsError::Transport(err)
        })?;

        tracing::debug!(status = response.status(), "SMS request completed");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::client::TransportErrorKind;

    #[derive(Debug, Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
        fail_with: Option<TransportErrorKind>,
    }

    impl BlockingHttpTransport for RecordingTransport {
        fn post_json(&self, request: HttpRequest) -> Result<RawResponse, TransportFailure> {
            self.requests.lock().unwrap().push(request);
            match self.fail_with {
                Some(kind) => Err(TransportFailure::new(kind, "simulated failure")),
                None => Ok(RawResponse::new(200, "HTTP/1.1 200 OK\r\n\r\n[1]")),
            }
        }
    }

    fn make_sender(transport: Arc<RecordingTransport>) -> Sender {
        Sender {
            token: ApiToken::new("tok"),
            message: Message::new(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            http: transport,
        }
    }

    #[test]
    fn send_returns_raw_response() {
        let transport = Arc::new(RecordingTransport::default());
        let mut sender = make_sender(transport.clone());
        sender.set_to("1").set_from("2").set_message("3");

        let response = sender.send().unwrap();
        assert_eq!(response.text(), "HTTP/1.1 200 OK\r\n\r\n[1]");
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn missing_fields_make_no_request() {
        let transport = Arc::new(RecordingTransport::default());
        let sender = make_sender(transport.clone());

        assert!(matches!(sender.send(), Err(VertexSmsError::Validation(_))));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn connect_failure_maps_to_transport_error() {
        let transport = Arc::new(RecordingTransport {
            fail_with: Some(TransportErrorKind::Connect),
            ..Default::default()
        });
        let mut sender = make_sender(transport);
        sender.set_to("1").set_from("2").set_message("3");

        let err = sender.send().unwrap_err();
        assert_eq!(err.transport_kind(), Some(TransportErrorKind::Connect));
    }

    #[test]
    fn send_over_socket_keeps_body_bytes() {
        let (url, server) = crate::client::test_server::serve_once(
            b"HTTP/1.1 201 Created\r\nX-A: 1\r\nContent-Length: 3\r\n\
              Connection: close\r\n\r\n[\xff]"
                .to_vec(),
        );
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        let mut sender = Sender {
            token: ApiToken::new("tok"),
            message: Message::new(),
            endpoint: url,
            timeout: Duration::from_secs(5),
            http: Arc::new(ReqwestBlockingTransport { client }),
        };
        sender.set_to("1").set_from("2").set_message("3");

        let response = sender.send().unwrap();
        assert_eq!(response.status(), 201);
        assert_eq!(response.body_bytes(), b"[\xff]");
        assert!(response.as_bytes().starts_with(b"HTTP/1.1 201 Created\r\n"));
        assert!(response.text().contains("x-a: 1\r\n"));

        let request = String::from_utf8(server.join().unwrap()).unwrap();
        assert!(request.to_ascii_lowercase().contains("x-vertexsms-token: tok\r\n"));
    }

    #[test]
    fn builder_produces_blocking_sender() {
        let sender = Sender::builder("tok")
            .endpoint("http://localhost:9000/sms")
            .timeout(Duration::from_secs(1))
            .build_blocking()
            .unwrap();
        assert_eq!(sender.endpoint(), "http://localhost:9000/sms");
        assert_eq!(sender.timeout(), Duration::from_secs(1));
    }
}
