use serde::Serialize;

use crate::domain::{Message, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to serialize request body: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON body of `POST /sms`.
///
/// `dlrUrl`, `priority`, `scheduled`, `testMode` and `expireIn` are always written and
/// become `null` when unset. `udh` and `coding` are written only when set. The service's
/// handling of `null` versus an absent key is unknown, so both shapes are kept as-is.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsJsonRequest<'a> {
    to: &'a str,
    from: &'a str,
    message: &'a str,
    dlr_url: Option<&'a str>,
    priority: Option<&'a str>,
    scheduled: Option<&'a str>,
    test_mode: Option<&'a serde_json::Value>,
    expire_in: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    udh: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coding: Option<u8>,
}

/// Keys written for every message; `udh` and `coding` come on top when set.
const ALWAYS_PRESENT_KEYS: usize = 8;

impl<'a> TryFrom<&'a Message> for SendSmsJsonRequest<'a> {
    type Error = ValidationError;

    fn try_from(message: &'a Message) -> Result<Self, Self::Error> {
        let (to, from, text) = message.required_fields()?;
        Ok(Self {
            to,
            from,
            message: text,
            dlr_url: message.dlr_url(),
            priority: message.priority(),
            scheduled: message.scheduled(),
            test_mode: message.test_mode(),
            expire_in: message.expire_in(),
            udh: message.udh(),
            coding: message.coding(),
        })
    }
}

pub fn encode_send_sms_json(message: &Message) -> Result<String, EncodeError> {
    let request = SendSmsJsonRequest::try_from(message)?;
    Ok(serde_json::to_string(&request)?)
}

/// Number of top-level keys [`encode_send_sms_json`] writes for `message`.
pub fn send_sms_key_count(message: &Message) -> usize {
    ALWAYS_PRESENT_KEYS
        + usize::from(message.udh().is_some())
        + usize::from(message.coding().is_some())
}
