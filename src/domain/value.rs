use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash)]
/// VertexSMS API token.
///
/// Sent only as the `X-VertexSMS-Token` header, never in the request body. The value is
/// passed through as provided; the service is the authority on whether it is valid.
pub struct ApiToken(String);

impl ApiToken {
    /// Header name used by VertexSMS to carry the token.
    pub const HEADER: &'static str = "X-VertexSMS-Token";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delivery priority (`priority`).
///
/// Convenience for the documented values; the setter also takes any string, which is
/// forwarded to the service unchecked.
pub enum Priority {
    /// Registration forms, password reminders and other important messages.
    High,
    /// Default priority.
    Normal,
    /// Mass messages.
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_str().to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Test mode (`testMode`): the service simulates the outcome instead of delivering.
pub enum TestMode {
    /// Emulate a successful delivery (`1`).
    Success,
    /// Emulate a failed delivery (`2`).
    Failure,
}

impl TestMode {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 1,
            Self::Failure => 2,
        }
    }
}

impl From<TestMode> for serde_json::Value {
    fn from(value: TestMode) -> Self {
        serde_json::Value::from(value.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message text encoding (`coding`).
///
/// Setting a coding disables automatic splitting on the service side; messages over the
/// single-part limit (160 GSM-7 / 70 UCS-2 characters) then need a `udh` as well.
pub enum Coding {
    /// GSM 7-bit default alphabet (`0`).
    Gsm7,
    /// UCS-2 (`2`).
    Ucs2,
}

impl Coding {
    pub fn code(self) -> u8 {
        match self {
            Self::Gsm7 => 0,
            Self::Ucs2 => 2,
        }
    }
}

impl From<Coding> for u8 {
    fn from(value: Coding) -> Self {
        value.code()
    }
}
