use crate::domain::validation::{REQUIRED_FIELDS, ValidationError};

#[derive(Debug, Clone, Default, PartialEq)]
/// Outbound message fields.
///
/// Every field starts unset. Setters overwrite the stored value without checking it;
/// the only local rule is that `to`, `from` and `message` are present and non-empty
/// when the message is sent (see [`Message::check_required`]).
pub struct Message {
    to: Option<String>,
    from: Option<String>,
    message: Option<String>,
    dlr_url: Option<String>,
    priority: Option<String>,
    scheduled: Option<String>,
    udh: Option<String>,
    coding: Option<u8>,
    test_mode: Option<serde_json::Value>,
    expire_in: Option<u32>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination address (recipient).
    pub fn set_to(&mut self, to: impl Into<String>) -> &mut Self {
        self.to = Some(to.into());
        self
    }

    /// Source address (originator).
    pub fn set_from(&mut self, from: impl Into<String>) -> &mut Self {
        self.from = Some(from.into());
        self
    }

    /// Message body. Without `udh` the service splits long texts automatically.
    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = Some(message.into());
        self
    }

    /// URL that receives the delivery report for each submitted message.
    pub fn set_dlr_url(&mut self, dlr_url: impl Into<String>) -> &mut Self {
        self.dlr_url = Some(dlr_url.into());
        self
    }

    /// Delivery priority; see [`Priority`](crate::Priority) for the documented values.
    pub fn set_priority(&mut self, priority: impl Into<String>) -> &mut Self {
        self.priority = Some(priority.into());
        self
    }

    /// Scheduled send time as an ISO 8601 timestamp, e.g. `2015-01-01T13:00:00+02:00`.
    pub fn set_scheduled(&mut self, scheduled: impl Into<String>) -> &mut Self {
        self.scheduled = Some(scheduled.into());
        self
    }

    /// User Data Header, each hex pair prefixed with `%`. Disables automatic splitting.
    pub fn set_udh(&mut self, udh: impl Into<String>) -> &mut Self {
        self.udh = Some(udh.into());
        self
    }

    /// Text encoding; see [`Coding`](crate::Coding). Disables automatic splitting.
    pub fn set_coding(&mut self, coding: impl Into<u8>) -> &mut Self {
        self.coding = Some(coding.into());
        self
    }

    /// Test mode; see [`TestMode`](crate::TestMode). Integers and strings are sent as given.
    pub fn set_test_mode(&mut self, test_mode: impl Into<serde_json::Value>) -> &mut Self {
        self.test_mode = Some(test_mode.into());
        self
    }

    /// Seconds after which the service stops attempting delivery (documented range
    /// `360..=432000`, not checked here).
    pub fn set_expire_in(&mut self, expire_in: u32) -> &mut Self {
        self.expire_in = Some(expire_in);
        self
    }

    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn dlr_url(&self) -> Option<&str> {
        self.dlr_url.as_deref()
    }

    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    pub fn scheduled(&self) -> Option<&str> {
        self.scheduled.as_deref()
    }

    pub fn udh(&self) -> Option<&str> {
        self.udh.as_deref()
    }

    pub fn coding(&self) -> Option<u8> {
        self.coding
    }

    pub fn test_mode(&self) -> Option<&serde_json::Value> {
        self.test_mode.as_ref()
    }

    pub fn expire_in(&self) -> Option<u32> {
        self.expire_in
    }

    /// Ensure `to`, `from` and `message` are all set to non-empty values.
    ///
    /// The error lists every missing field, not just the first one.
    pub fn check_required(&self) -> Result<(), ValidationError> {
        self.required_fields().map(|_| ())
    }

    /// `to`, `from` and `message`, or the list of those unset or empty.
    pub(crate) fn required_fields(&self) -> Result<(&str, &str, &str), ValidationError> {
        match (
            non_empty(self.to()),
            non_empty(self.from()),
            non_empty(self.message()),
        ) {
            (Some(to), Some(from), Some(message)) => Ok((to, from, message)),
            (to, from, message) => {
                let fields = REQUIRED_FIELDS
                    .iter()
                    .zip([to.is_none(), from.is_none(), message.is_none()])
                    .filter(|(_, missing)| *missing)
                    .map(|(field, _)| *field)
                    .collect();
                Err(ValidationError::MissingRequiredFields { fields })
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
