//! Transport layer: wire-format details (request body serialization).

mod send_sms;

pub use send_sms::{EncodeError, encode_send_sms_json, send_sms_key_count};
