//! Domain layer: message fields and value helpers (no I/O).

mod message;
mod response;
mod validation;
mod value;

pub use message::Message;
pub use response::RawResponse;
pub use validation::ValidationError;
pub use value::{ApiToken, Coding, Priority, TestMode};

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Message {
        let mut message = Message::new();
        message
            .set_to("37088888888")
            .set_from("TestSender")
            .set_message("This is test message");
        message
    }

    #[test]
    fn new_message_has_every_field_unset() {
        let message = Message::new();
        assert_eq!(message.to(), None);
        assert_eq!(message.from(), None);
        assert_eq!(message.message(), None);
        assert_eq!(message.dlr_url(), None);
        assert_eq!(message.priority(), None);
        assert_eq!(message.scheduled(), None);
        assert_eq!(message.udh(), None);
        assert_eq!(message.coding(), None);
        assert_eq!(message.test_mode(), None);
        assert_eq!(message.expire_in(), None);
    }

    #[test]
    fn check_required_lists_all_missing_fields() {
        let err = Message::new().check_required().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredFields {
                fields: vec!["to", "from", "message"]
            }
        );

        let mut message = Message::new();
        message.set_from("TestSender");
        let err = message.check_required().unwrap_err();
        assert_eq!(err.missing_fields(), &["to", "message"]);
    }

    #[test]
    fn check_required_treats_empty_string_as_missing() {
        let mut message = complete();
        message.set_message("");
        let err = message.check_required().unwrap_err();
        assert_eq!(err.missing_fields(), &["message"]);
    }

    #[test]
    fn check_required_accepts_complete_message() {
        assert!(complete().check_required().is_ok());
    }

    #[test]
    fn setters_overwrite_without_validation() {
        let mut message = complete();
        message
            .set_priority(Priority::High)
            .set_priority("urgent")
            .set_expire_in(5)
            .set_coding(7_u8)
            .set_test_mode("2");

        assert_eq!(message.priority(), Some("urgent"));
        assert_eq!(message.expire_in(), Some(5));
        assert_eq!(message.coding(), Some(7));
        assert_eq!(message.test_mode(), Some(&serde_json::json!("2")));
    }

    #[test]
    fn value_helpers_map_to_wire_values() {
        assert_eq!(String::from(Priority::Low), "low");
        assert_eq!(Priority::Normal.as_str(), "normal");
        assert_eq!(serde_json::Value::from(TestMode::Success), serde_json::json!(1));
        assert_eq!(serde_json::Value::from(TestMode::Failure), serde_json::json!(2));
        assert_eq!(u8::from(Coding::Gsm7), 0);
        assert_eq!(u8::from(Coding::Ucs2), 2);
    }

    #[test]
    fn api_token_debug_is_redacted() {
        let token = ApiToken::new("secret-token");
        assert_eq!(token.as_str(), "secret-token");
        assert!(!format!("{token:?}").contains("secret-token"));
    }
}
