//! Client layer: holds the message fields and performs the HTTP request.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{ApiToken, Message, RawResponse, ValidationError};
use crate::transport::EncodeError;

#[cfg(feature = "blocking")]
pub mod blocking;
mod http;
#[cfg(test)]
mod test_server;

use http::{HttpRequest, HttpTransport, ReqwestTransport};
pub use http::{TransportErrorKind, TransportFailure};

/// VertexSMS message submission endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.vertexsms.com/sms";

/// Timeout applied to each send.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

const DEFAULT_USER_AGENT: &str = concat!("vertexsms/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Sender::send`] and [`SenderBuilder::build`].
///
/// HTTP status codes are not errors: a 4xx or 5xx reply is returned as a
/// [`RawResponse`] like any other.
pub enum VertexSmsError {
    /// `to`, `from` or `message` was not set. Raised before any network I/O.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request produced no HTTP response (DNS, connect, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[source] TransportFailure),

    /// The request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured endpoint is not an absolute `http`/`https` URL.
    #[error("invalid endpoint URL: {endpoint}")]
    InvalidEndpoint { endpoint: String },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] TransportFailure),
}

impl VertexSmsError {
    /// Transport failure kind, if this is a [`VertexSmsError::Transport`] error.
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self {
            Self::Transport(failure) => Some(failure.kind()),
            _ => None,
        }
    }
}

impl From<EncodeError> for VertexSmsError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::Validation(err) => Self::Validation(err),
            EncodeError::Json(err) => Self::Encode(err),
        }
    }
}

// Setters shared by the async and blocking senders; both keep a `message: Message`.
macro_rules! message_setters {
    () => {
        /// Set the destination address (recipient).
        pub fn set_to(&mut self, to: impl Into<String>) -> &mut Self {
            self.message.set_to(to);
            self
        }

        /// Set the source address (originator).
        pub fn set_from(&mut self, from: impl Into<String>) -> &mut Self {
            self.message.set_from(from);
            self
        }

        /// Set the message body.
        pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
            self.message.set_message(message);
            self
        }

        /// Set the delivery report callback URL.
        pub fn set_dlr_url(&mut self, dlr_url: impl Into<String>) -> &mut Self {
            self.message.set_dlr_url(dlr_url);
            self
        }

        /// Set the delivery priority (`high`, `normal`, `low`).
        pub fn set_priority(&mut self, priority: impl Into<String>) -> &mut Self {
            self.message.set_priority(priority);
            self
        }

        /// Set the ISO 8601 time at which the message should be sent.
        pub fn set_scheduled(&mut self, scheduled: impl Into<String>) -> &mut Self {
            self.message.set_scheduled(scheduled);
            self
        }

        /// Set the User Data Header.
        pub fn set_udh(&mut self, udh: impl Into<String>) -> &mut Self {
            self.message.set_udh(udh);
            self
        }

        /// Set the text encoding.
        pub fn set_coding(&mut self, coding: impl Into<u8>) -> &mut Self {
            self.message.set_coding(coding);
            self
        }

        /// Enable test mode.
        pub fn set_test_mode(&mut self, test_mode: impl Into<serde_json::Value>) -> &mut Self {
            self.message.set_test_mode(test_mode);
            self
        }

        /// Set the expiry in seconds.
        pub fn set_expire_in(&mut self, expire_in: u32) -> &mut Self {
            self.message.set_expire_in(expire_in);
            self
        }

        /// Fields set so far.
        pub fn message(&self) -> &Message {
            &self.message
        }

        /// Endpoint the message is posted to.
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }

        /// Timeout applied to each send.
        pub fn timeout(&self) -> Duration {
            self.timeout
        }
    };
}

#[cfg(feature = "blocking")]
pub(crate) use message_setters;

#[derive(Debug, Clone)]
/// Builder for [`Sender`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct SenderBuilder {
    token: ApiToken,
    endpoint: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl SenderBuilder {
    /// Create a builder with the default endpoint and timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: ApiToken::new(token),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the endpoint URL, e.g. to point at a local mock server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the per-send timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`Sender`].
    pub fn build(self) -> Result<Sender, VertexSmsError> {
        validate_endpoint(&self.endpoint)?;

        // No idle connections are kept: every send dials its own connection.
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(self.user_agent_or_default())
            .build()
            .map_err(|err| VertexSmsError::Build(err.into()))?;

        Ok(Sender {
            token: self.token,
            message: Message::new(),
            endpoint: self.endpoint,
            timeout: self.timeout,
            http: Arc::new(ReqwestTransport { client }),
        })
    }

    /// Build a [`blocking::Sender`].
    #[cfg(feature = "blocking")]
    pub fn build_blocking(self) -> Result<blocking::Sender, VertexSmsError> {
        validate_endpoint(&self.endpoint)?;

        let client = reqwest::blocking::Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(self.user_agent_or_default())
            .build()
            .map_err(|err| VertexSmsError::Build(err.into()))?;

        Ok(blocking::Sender::from_parts(
            self.token,
            self.endpoint,
            self.timeout,
            client,
        ))
    }

    fn user_agent_or_default(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned())
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), VertexSmsError> {
    match url::Url::parse(endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(VertexSmsError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
        }),
    }
}

#[derive(Clone)]
/// VertexSMS message sender.
///
/// Holds the API token and the outbound message fields. [`Sender::send`] validates that
/// `to`, `from` and `message` are set, posts the fields as JSON to the endpoint with
/// the token in the `X-VertexSMS-Token` header, and returns the raw response.
///
/// The sender is not consumed by a send; fields stay set and the same message can be
/// sent again.
pub struct Sender {
    token: ApiToken,
    message: Message,
    endpoint: String,
    timeout: Duration,
    http: Arc<dyn HttpTransport>,
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
    /// Create a sender using the default endpoint and timeout.
    ///
    /// For more customization, use [`Sender::builder`].
    pub fn new(token: impl Into<String>) -> Self {
        // Same failure mode as `reqwest::Client::new`: only a TLS backend that cannot
        // initialize makes this configuration fail to build.
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .expect("default HTTP client configuration is static; only TLS init can fail");

        Self {
            token: ApiToken::new(token),
            message: Message::new(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            http: Arc::new(ReqwestTransport { client }),
        }
    }

    /// Start building a sender with custom settings.
    pub fn builder(token: impl Into<String>) -> SenderBuilder {
        SenderBuilder::new(token)
    }

    message_setters!();

    /// Post the message to VertexSMS.
    ///
    /// Errors:
    /// - [`VertexSmsError::Validation`] if `to`, `from` or `message` is unset or empty; no
    ///   request is made,
    /// - [`VertexSmsError::Transport`] if the request yields no HTTP response.
    ///
    /// Any HTTP status is returned as `Ok`.
    pub async fn send(&self) -> Result<RawResponse, VertexSmsError> {
        let request =
            HttpRequest::send_sms(&self.token, &self.message, &self.endpoint, self.timeout)?;
        let response = self.http.post_json(request).await.map_err(|err| {
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
