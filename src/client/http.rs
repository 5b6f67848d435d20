//! HTTP seam between [`Sender`](super::Sender) and the network.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::domain::{ApiToken, Message, RawResponse};
use crate::transport::{EncodeError, encode_send_sms_json, send_sms_key_count};

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

const CONTENT_TYPE_HEADER: &str = "Content-Type";
const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Classification of a transport failure.
pub enum TransportErrorKind {
    /// The request did not complete within the configured timeout.
    Timeout,
    /// DNS resolution, TCP connect or TLS handshake failed.
    Connect,
    /// Sending the request failed after the connection was established.
    Request,
    /// Reading the response body failed.
    Body,
    /// The request or client could not be constructed (e.g. invalid header value).
    Builder,
    Other,
}

impl TransportErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Builder => "builder",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{kind}: {source}")]
/// Network-level failure: the request produced no HTTP response.
pub struct TransportFailure {
    kind: TransportErrorKind,
    source: Box<dyn StdError + Send + Sync>,
}

impl TransportFailure {
    pub fn new(
        kind: TransportErrorKind,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_builder() {
            TransportErrorKind::Builder
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else if err.is_request() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Build the `POST /sms` request, rejecting incomplete messages before any I/O.
    pub fn send_sms(
        token: &ApiToken,
        message: &Message,
        url: &str,
        timeout: Duration,
    ) -> Result<Self, super::VertexSmsError> {
        let body = encode_send_sms_json(message).map_err(|err| {
            if let EncodeError::Validation(err) = &err {
                tracing::debug!(
                    missing = ?err.missing_fields(),
                    "refusing to send incomplete SMS"
                );
            }
            super::VertexSmsError::from(err)
        })?;
        tracing::debug!(
            endpoint = %url,
            keys = send_sms_key_count(message),
            has_udh = message.udh().is_some(),
            has_coding = message.coding().is_some(),
            "sending SMS"
        );

        Ok(Self {
            url: url.to_owned(),
            headers: vec![
                (ApiToken::HEADER, token.as_str().to_owned()),
                (CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON.to_owned()),
            ],
            body,
            timeout,
        })
    }
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<RawResponse, TransportFailure>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    pub client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<RawResponse, TransportFailure>> {
        Box::pin(async move {
            let mut builder = self.client.post(&request.url).timeout(request.timeout);
            for (name, value) in &request.headers {
                builder = builder.header(*name, value);
            }

            let response = builder.body(request.body).send().await?;
            let version = response.version();
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;

            Ok(raw_response(version, status, &headers, &body))
        })
    }
}

/// Render a parsed response back into raw form, keeping the body bytes untouched.
pub(crate) fn raw_response(
    version: reqwest::Version,
    status: reqwest::StatusCode,
    headers: &reqwest::header::HeaderMap,
    body: &[u8],
) -> RawResponse {
    RawResponse::from_parts(
        version_str(version),
        status.as_u16(),
        status.canonical_reason(),
        headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_bytes())),
        body,
    )
}

fn version_str(version: reqwest::Version) -> &'static str {
    if version == reqwest::Version::HTTP_09 {
        "HTTP/0.9"
    } else if version == reqwest::Version::HTTP_10 {
        "HTTP/1.0"
    } else if version == reqwest::Version::HTTP_2 {
        "HTTP/2"
    } else if version == reqwest::Version::HTTP_3 {
        "HTTP/3"
    } else {
        "HTTP/1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_sms_request_carries_token_and_json_headers() {
        let mut message = Message::new();
        message.set_to("1").set_from("2").set_message("3");

        let request = HttpRequest::send_sms(
            &ApiToken::new("tok"),
            &message,
            "https://example.invalid/sms",
            Duration::from_secs(3),
        )
        .unwrap();

        assert_eq!(request.url, "https://example.invalid/sms");
        assert_eq!(
            request.headers,
            vec![
                ("X-VertexSMS-Token", "tok".to_owned()),
                ("Content-Type", "application/json".to_owned()),
            ]
        );
        assert_eq!(request.timeout, Duration::from_secs(3));
        assert!(request.body.starts_with("{\"to\":\"1\""));
    }

    #[test]
    fn transport_failure_display_includes_kind() {
        let err = TransportFailure::new(TransportErrorKind::Timeout, "operation timed out");
        assert_eq!(err.to_string(), "timeout: operation timed out");
        assert!(err.is_timeout());
        assert_eq!(err.kind(), TransportErrorKind::Timeout);
    }
}
