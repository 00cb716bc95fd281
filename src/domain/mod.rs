//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{HttpMethod, OutgoingRequest, RequestOptions, SendMessage};
pub use response::{
    ApiResult, ErrorInfo, INTERNAL_SERVER_ERROR_MESSAGE, SendMessageResponse, UNRESOLVED_MESSAGE,
};
pub use validation::ValidationError;
pub use value::{ApiKey, ErrorName, KnownErrorName, PhoneNumber};

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderValue, USER_AGENT};
    use serde_json::json;

    use super::*;

    #[test]
    fn send_message_serializes_in_memory_case_and_skips_missing_media() {
        let msg = SendMessage::new("+16175555555", "Hello");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"to": "+16175555555", "message": "Hello"})
        );

        let msg = msg.media_url("https://cdn.example/cat.png");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "to": "+16175555555",
                "message": "Hello",
                "mediaUrl": "https://cdn.example/cat.png"
            })
        );
    }

    #[test]
    fn send_message_response_reads_camel_case_keys() {
        let resp: SendMessageResponse = serde_json::from_value(json!({
            "id": "msg_123",
            "status": "sent",
            "sentAt": "2024-11-09T16:54:23.127072Z"
        }))
        .unwrap();
        assert_eq!(resp.id, "msg_123");
        assert_eq!(resp.sent_at, "2024-11-09T16:54:23.127072Z");
    }

    #[test]
    fn api_result_populates_exactly_one_side() {
        let ok = ApiResult::ok(1);
        assert!(ok.is_ok());
        assert_eq!(ok.data(), Some(&1));
        assert!(ok.error().is_none());
        assert_eq!(ok.into_result(), Ok(1));

        let err = ApiResult::<i32>::err(ErrorInfo::unresolved());
        assert!(!err.is_ok());
        assert!(err.data().is_none());
        assert_eq!(
            err.error().map(|e| e.name.known()),
            Some(Some(KnownErrorName::ApplicationError))
        );
    }

    #[test]
    fn api_result_serializes_as_data_error_envelope() {
        let err = ApiResult::<i32>::err(ErrorInfo::new("not_found", "gone"));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"data": null, "error": {"name": "not_found", "message": "gone"}})
        );

        let ok = ApiResult::ok(json!({"aB": 1}));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"data": {"aB": 1}, "error": null})
        );
    }

    #[test]
    fn local_error_messages_are_fixed() {
        assert_eq!(
            ErrorInfo::unresolved(),
            ErrorInfo::new(
                "application_error",
                "Unable to fetch data. The request could not be resolved."
            )
        );
        assert_eq!(
            ErrorInfo::internal_server_error().message,
            "Internal server error. We're unable to process your request right now, please try again later."
        );
    }

    #[test]
    fn request_options_accumulate() {
        let options = RequestOptions::default()
            .query("page_size", "10")
            .header(USER_AGENT, HeaderValue::from_static("custom/1.0"));
        assert_eq!(
            options.query,
            vec![("page_size".to_owned(), "10".to_owned())]
        );
        assert_eq!(options.headers.get(USER_AGENT).unwrap(), "custom/1.0");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }
}
